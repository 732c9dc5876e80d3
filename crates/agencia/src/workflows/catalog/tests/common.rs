use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::domain::{Record, RecordId};
use crate::store::{AgencyStore, Repository, RepositoryError};

pub(super) struct UnavailableRepository;

#[async_trait]
impl<R: Record> Repository<R> for UnavailableRepository {
    async fn insert(&self, _fields: R::Fields) -> Result<R, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list(&self) -> Result<Vec<R>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch(&self, _id: &RecordId) -> Result<Option<R>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update(
        &self,
        _id: &RecordId,
        _changes: R::Fields,
    ) -> Result<Option<R>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: &RecordId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn offline_store() -> AgencyStore {
    AgencyStore {
        clients: Arc::new(UnavailableRepository),
        vehicles: Arc::new(UnavailableRepository),
        appointments: Arc::new(UnavailableRepository),
        offers: Arc::new(UnavailableRepository),
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("json body")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
