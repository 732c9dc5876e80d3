use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Months, TimeZone, Utc};

use crate::domain::{Client, ClientFields, Offer, OfferFields, Patch, RecordId, Timestamp};
use crate::store::{AgencyStore, MemoryRepository, Repository, RepositoryError};
use crate::workflows::inactivity::InactivitySweep;

pub(super) fn sweep_time() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub(super) fn months_before(now: Timestamp, months: u32) -> Timestamp {
    now.checked_sub_months(Months::new(months))
        .expect("representable date")
}

pub(super) fn client(name: &str, last_visit: Option<Timestamp>) -> ClientFields {
    ClientFields {
        first_name: Patch::Set(name.to_string()),
        last_name: Patch::Set("Prueba".to_string()),
        phone: Patch::Set("555-0100".to_string()),
        last_visit: last_visit.into(),
        ..ClientFields::default()
    }
}

pub(super) async fn seed(store: &AgencyStore, fields: ClientFields) -> Client {
    store.clients.insert(fields).await.expect("client stored")
}

pub(super) fn sweep_for(store: &AgencyStore) -> InactivitySweep {
    InactivitySweep::from_store(store)
}

/// Offer collection that accepts `remaining` inserts and then goes offline.
pub(super) struct FlakyOffers {
    inner: MemoryRepository<Offer>,
    remaining: AtomicUsize,
}

impl FlakyOffers {
    pub(super) fn allowing(inserts: usize) -> Self {
        Self {
            inner: MemoryRepository::new(),
            remaining: AtomicUsize::new(inserts),
        }
    }
}

#[async_trait]
impl Repository<Offer> for FlakyOffers {
    async fn insert(&self, fields: OfferFields) -> Result<Offer, RepositoryError> {
        let allowed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(RepositoryError::Unavailable("offers offline".to_string()));
        }
        self.inner.insert(fields).await
    }

    async fn list(&self) -> Result<Vec<Offer>, RepositoryError> {
        self.inner.list().await
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<Offer>, RepositoryError> {
        self.inner.fetch(id).await
    }

    async fn update(
        &self,
        id: &RecordId,
        changes: OfferFields,
    ) -> Result<Option<Offer>, RepositoryError> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        self.inner.delete(id).await
    }
}

pub(super) fn store_with_offers(offers: Arc<dyn Repository<Offer>>) -> AgencyStore {
    AgencyStore {
        offers,
        ..AgencyStore::in_memory()
    }
}
