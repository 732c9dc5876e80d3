use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::{Offer, OfferSubmission, Record, RecordId, Timestamp};
use crate::store::{Repository, RepositoryError};

/// CRUD facade over one collection.
pub struct CatalogService<R: Record> {
    repository: Arc<dyn Repository<R>>,
}

impl<R: Record> CatalogService<R> {
    pub fn new(repository: Arc<dyn Repository<R>>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<R>, CatalogError> {
        let records = self.repository.list().await?;
        debug!(collection = R::COLLECTION, count = records.len(), "listed records");
        Ok(records)
    }

    pub async fn create(&self, fields: R::Fields) -> Result<R, CatalogError> {
        let record = self.repository.insert(fields).await?;
        debug!(collection = R::COLLECTION, id = %record.id(), "record created");
        Ok(record)
    }

    /// Merge `changes` into the record. Unknown ids are reported, never created.
    pub async fn update(&self, id: &RecordId, changes: R::Fields) -> Result<R, CatalogError> {
        match self.repository.update(id, changes).await? {
            Some(record) => {
                debug!(collection = R::COLLECTION, %id, "record updated");
                Ok(record)
            }
            None => Err(CatalogError::NotFound {
                collection: R::COLLECTION,
                id: id.clone(),
            }),
        }
    }
}

impl CatalogService<Offer> {
    /// Create an offer whose expiration is three months past its date.
    pub async fn publish(
        &self,
        submission: OfferSubmission,
        now: Timestamp,
    ) -> Result<Offer, CatalogError> {
        self.create(submission.into_fields(now)).await
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no document '{id}' in {collection}")]
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Repository(err) => {
                warn!(error = %err, "catalog request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
