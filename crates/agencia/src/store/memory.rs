use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::{Repository, RepositoryError};
use crate::domain::{Record, RecordId};

/// Mutex-guarded collection kept in process memory.
///
/// Identifiers are 24 hex digits drawn from a monotonic sequence, so ordering
/// the map by id also enumerates documents in insertion order.
pub struct MemoryRepository<R> {
    records: Mutex<BTreeMap<RecordId, R>>,
    sequence: Arc<AtomicU64>,
}

impl<R> MemoryRepository<R> {
    pub fn new() -> Self {
        Self::with_sequence(Arc::new(AtomicU64::new(1)))
    }

    pub fn with_sequence(sequence: Arc<AtomicU64>) -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence,
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<RecordId, R>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }

    fn next_id(&self) -> RecordId {
        let value = self.sequence.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("{value:024x}"))
    }
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn insert(&self, fields: R::Fields) -> Result<R, RepositoryError> {
        let id = self.next_id();
        let record = R::from_fields(id.clone(), fields);

        let mut guard = self.records()?;
        guard.insert(id, record.clone());
        debug!(collection = R::COLLECTION, id = %record.id(), "document inserted");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<R>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard.values().cloned().collect())
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<R>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard.get(id).cloned())
    }

    async fn update(
        &self,
        id: &RecordId,
        changes: R::Fields,
    ) -> Result<Option<R>, RepositoryError> {
        let mut guard = self.records()?;
        Ok(guard.get_mut(id).map(|record| {
            record.apply(changes);
            record.clone()
        }))
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        let mut guard = self.records()?;
        Ok(guard.remove(id).is_some())
    }
}
