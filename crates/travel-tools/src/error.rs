//! Error types for tool registration and invocation.

use std::time::Duration;

use thiserror::Error;
use travel_providers::ProviderError;

/// Outcome classes a caller can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request names a tool that does not exist.
    InvalidRequest,
    /// The arguments do not satisfy the tool's schema.
    InvalidParams,
    /// A collaborator, network or formatting failure.
    InternalError,
    /// The invocation exceeded its deadline.
    Timeout,
}

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Argument name the tool does not declare.
    #[error("Unexpected parameter: {0}")]
    UnexpectedParameter(String),

    /// Collaborator call failed.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Rendering the result failed.
    #[error("Formatting failed: {0}")]
    Format(String),

    /// Deadline exceeded.
    #[error("Timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

impl ToolError {
    /// Create an invalid parameter error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::UnknownTool(_) => ErrorKind::InvalidRequest,
            ToolError::MissingParameter(_)
            | ToolError::InvalidParameter { .. }
            | ToolError::UnexpectedParameter(_) => ErrorKind::InvalidParams,
            ToolError::Timeout(_) => ErrorKind::Timeout,
            ToolError::Provider(_) | ToolError::JsonError(_) | ToolError::Format(_) => {
                ErrorKind::InternalError
            }
        }
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// The tool's argument translation does not fit its collaborator.
    #[error("Argument mapping for '{tool}' -> '{provider}' is invalid: {reason}")]
    Mapping {
        tool: String,
        provider: &'static str,
        reason: String,
    },

    /// The tool's parameter schema is inconsistent.
    #[error("Invalid spec for '{tool}': {reason}")]
    InvalidSpec { tool: String, reason: String },
}
