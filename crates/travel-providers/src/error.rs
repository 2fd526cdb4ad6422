//! Error types for travel data providers.

use thiserror::Error;

/// Errors a provider collaborator can raise.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream API answered with a non-success status.
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    /// Nothing is known about the requested subject.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The call arguments do not match what the provider accepts.
    #[error("Invalid query for {provider}: {reason}")]
    InvalidQuery {
        provider: &'static str,
        reason: String,
    },

    /// The provider is not configured or currently unusable.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Create an invalid query error.
    pub fn invalid_query(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            provider,
            reason: reason.into(),
        }
    }
}
