use crate::config::ConfigError;
use crate::store::{RepositoryError, StoreError};
use crate::telemetry::TelemetryError;
use crate::workflows::catalog::CatalogError;
use crate::workflows::inactivity::SweepError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Store(StoreError),
    Repository(RepositoryError),
    Catalog(CatalogError),
    Sweep(SweepError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Store(err) => write!(f, "store error: {err}"),
            AppError::Repository(err) => write!(f, "repository error: {err}"),
            AppError::Catalog(err) => write!(f, "catalog error: {err}"),
            AppError::Sweep(err) => write!(f, "sweep error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Sweep(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<SweepError> for AppError {
    fn from(value: SweepError) -> Self {
        Self::Sweep(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_match_the_handler_status() {
        let err = AppError::from(RepositoryError::Unavailable("connection reset".to_string()));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let sweep = AppError::from(SweepError::Repository(RepositoryError::Corrupt(
            "bad date".to_string(),
        )));
        assert_eq!(sweep.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_failures_are_internal_errors() {
        let err = AppError::from(ConfigError::InvalidPort {
            value: "x".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_records_keep_their_not_found_status() {
        let err = AppError::from(CatalogError::NotFound {
            collection: "clientes",
            id: crate::domain::RecordId("c-404".to_string()),
        });
        assert!(err.to_string().contains("c-404"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
