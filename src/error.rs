//! Error types for meet-ai

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur in the agent directory and live call simulator
#[derive(Debug, Error)]
pub enum MeetError {
    /// Agent missing or not owned by the session user
    #[error("Agent not found")]
    NotFound(String),

    /// No valid session attached to the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Input rejected before reaching the store
    #[error("{0}")]
    Validation(String),

    /// Meeting link lookup failure (never surfaced to users)
    #[error("Meeting link lookup failed: {0}")]
    LinkLookup(String),

    /// Storage backend failure
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server failure
    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type alias for meet-ai operations
pub type Result<T> = std::result::Result<T, MeetError>;

impl MeetError {
    /// Stable machine-readable code used in the JSON error envelope
    pub fn code(&self) -> &'static str {
        match self {
            MeetError::NotFound(_) => "NOT_FOUND",
            MeetError::Unauthorized(_) => "UNAUTHORIZED",
            MeetError::Validation(_) => "BAD_REQUEST",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            MeetError::NotFound(_) => StatusCode::NOT_FOUND,
            MeetError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MeetError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for MeetError {
    fn from(rejection: JsonRejection) -> Self {
        MeetError::Validation(rejection.body_text())
    }
}

impl IntoResponse for MeetError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}
