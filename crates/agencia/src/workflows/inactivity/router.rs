use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use super::sweep::InactivitySweep;

/// Exposes the sweep. The route is a GET but deletes and creates records.
pub fn inactivity_router(sweep: Arc<InactivitySweep>) -> Router {
    Router::new()
        .route("/revisar-clientes", get(review_handler))
        .with_state(sweep)
}

pub(crate) async fn review_handler(State(sweep): State<Arc<InactivitySweep>>) -> Response {
    match sweep.review(Utc::now()).await {
        Ok(reviews) => (StatusCode::OK, Json(reviews)).into_response(),
        Err(err) => {
            error!(error = %err, "inactivity sweep failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
