//! Error types for the server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider setup failed: {0}")]
    Provider(#[from] travel_providers::ProviderError),

    #[error("Tool registration failed: {0}")]
    Registry(#[from] travel_tools::RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors answered at the HTTP layer, before any JSON-RPC handling.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                let body = serde_json::json!({
                    "error": {
                        "message": "Unauthorized",
                        "type": "auth_error"
                    }
                });
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
        }
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
