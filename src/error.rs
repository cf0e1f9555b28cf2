use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ConfigError;

/// Body returned for any signing failure that is not the caller's fault
pub const SIGNING_FAILED_MESSAGE: &str = "Failed to generate signed URL";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing path")]
    MissingPath,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Signing error: {0}")]
    Sign(#[from] SignError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub enum SignError {
    /// Only arises when a caller assembles its own configuration; the server validates it at startup
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Token computation failed: {0}")]
    Hashing(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingPath => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Sign(e @ SignError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Sign(e) => {
                tracing::error!(error = %e, "sign-url error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SIGNING_FAILED_MESSAGE.to_string(),
                )
            }
            ApiError::Catalog(e) => {
                tracing::error!(error = %e, "catalog error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load items".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
