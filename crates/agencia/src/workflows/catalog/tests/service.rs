use super::common::*;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::domain::{Client, ClientFields, Offer, OfferSubmission, RecordId};
use crate::store::{MemoryRepository, RepositoryError};
use crate::workflows::catalog::{CatalogError, CatalogService};

#[tokio::test]
async fn update_reports_missing_records() {
    let service = CatalogService::<Client>::new(Arc::new(MemoryRepository::new()));

    match service
        .update(&RecordId("missing".to_string()), ClientFields::default())
        .await
    {
        Err(CatalogError::NotFound { collection, id }) => {
            assert_eq!(collection, "clientes");
            assert_eq!(id.as_str(), "missing");
        }
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[tokio::test]
async fn publish_falls_back_to_now_for_undated_offers() {
    let service = CatalogService::<Offer>::new(Arc::new(MemoryRepository::new()));
    let now = Utc.with_ymd_and_hms(2024, 11, 30, 8, 0, 0).unwrap();

    let offer = service
        .publish(OfferSubmission::default(), now)
        .await
        .expect("offer stored");

    assert!(offer.date.is_none());
    assert_eq!(
        offer.expires_at,
        Some(Utc.with_ymd_and_hms(2025, 2, 28, 8, 0, 0).unwrap())
    );
    assert_eq!(service.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn create_propagates_repository_failures() {
    let service = CatalogService::<Client>::new(Arc::new(UnavailableRepository));

    match service.create(ClientFields::default()).await {
        Err(CatalogError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository error, got {other:?}"),
    }
}
