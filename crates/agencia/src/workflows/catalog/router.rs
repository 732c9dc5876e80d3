use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;

use super::service::{CatalogError, CatalogService};
use crate::domain::{Offer, OfferSubmission, Record, RecordId};
use crate::store::AgencyStore;

/// Router builder exposing list/create/update for each collection.
pub fn catalog_router(store: &AgencyStore) -> Router {
    Router::new()
        .merge(record_routes(
            "/clientes",
            CatalogService::new(store.clients.clone()),
        ))
        .merge(record_routes(
            "/vehiculos",
            CatalogService::new(store.vehicles.clone()),
        ))
        .merge(record_routes(
            "/servicios",
            CatalogService::new(store.appointments.clone()),
        ))
        .merge(offer_routes(CatalogService::new(store.offers.clone())))
}

fn record_routes<R: Record>(path: &str, service: CatalogService<R>) -> Router {
    Router::new()
        .route(path, get(list_handler::<R>).post(create_handler::<R>))
        .route(&format!("{path}/:id"), put(update_handler::<R>))
        .with_state(Arc::new(service))
}

// Offers differ only on create, where the expiration gets stamped.
fn offer_routes(service: CatalogService<Offer>) -> Router {
    Router::new()
        .route(
            "/ofertas",
            get(list_handler::<Offer>).post(publish_handler),
        )
        .route("/ofertas/:id", put(update_handler::<Offer>))
        .with_state(Arc::new(service))
}

pub(crate) async fn list_handler<R: Record>(
    State(service): State<Arc<CatalogService<R>>>,
) -> Result<Json<Vec<R>>, CatalogError> {
    service.list().await.map(Json)
}

pub(crate) async fn create_handler<R: Record>(
    State(service): State<Arc<CatalogService<R>>>,
    Json(fields): Json<R::Fields>,
) -> Result<Json<R>, CatalogError> {
    service.create(fields).await.map(Json)
}

pub(crate) async fn update_handler<R: Record>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<String>,
    Json(changes): Json<R::Fields>,
) -> Result<Json<R>, CatalogError> {
    service.update(&RecordId(id), changes).await.map(Json)
}

pub(crate) async fn publish_handler(
    State(service): State<Arc<CatalogService<Offer>>>,
    Json(submission): Json<OfferSubmission>,
) -> Result<Json<Offer>, CatalogError> {
    service.publish(submission, Utc::now()).await.map(Json)
}
