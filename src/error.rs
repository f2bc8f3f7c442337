use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// Import Axum types for HTTP response conversion
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::agents::generate_user_friendly_error;
use crate::models::chatbot::StateTransitionError;

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error with field-level details.
    #[error("Validation error: {0:?}")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (resource changed underneath the caller).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The chatbot lifecycle rejected a status change.
    #[error("{0}")]
    InvalidStateTransition(StateTransitionError),

    /// An error reported by an AI provider call, message kept verbatim.
    #[error("{0}")]
    Provider(String),

    /// Every attempt returned an empty result.
    #[error("Empty response from {context} after {attempts} attempts")]
    EmptyResponse { context: String, attempts: u32 },

    /// The retry loop ended without a result or an error to report.
    #[error("Operation {context} failed after {attempts} attempts")]
    RetriesExhausted { context: String, attempts: u32 },

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Stable machine-readable code used in HTTP bodies.
    pub fn code(&self) -> &str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Conflict(_) => "CONFLICT",
            Error::InvalidStateTransition(err) => err.code.as_str(),
            Error::Provider(_) | Error::EmptyResponse { .. } | Error::RetriesExhausted { .. } => {
                "AGENT_ERROR"
            }
            Error::Config(_) => "CONFIG_ERROR",
            Error::Sqlx(_) | Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::NotFound(_)
                | Error::Conflict(_)
                | Error::InvalidStateTransition(_)
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InvalidStateTransition(_) => StatusCode::CONFLICT,
            Error::Provider(_) | Error::EmptyResponse { .. } | Error::RetriesExhausted { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Error::Sqlx(_) | Error::Internal(_) | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// Agent failures go through the user-facing translator so raw provider
/// messages never reach the client.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();

        let body = match &self {
            Error::Validation(ValidationErrors::Single { field, message }) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "code": code,
                    "fields": { field: message }
                })
            }
            Error::Validation(ValidationErrors::Multiple { fields }) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "code": code,
                    "fields": fields
                })
            }
            Error::NotFound(msg) | Error::Conflict(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": code
                })
            }
            Error::InvalidStateTransition(err) => {
                serde_json::json!({
                    "error": err.message,
                    "code": code,
                    "details": err.details
                })
            }
            Error::Provider(_) | Error::EmptyResponse { .. } | Error::RetriesExhausted { .. } => {
                serde_json::json!({
                    "error": generate_user_friendly_error(&self, "http"),
                    "code": code
                })
            }
            Error::Sqlx(_) => {
                serde_json::json!({
                    "error": "Database error",
                    "code": code
                })
            }
            Error::Internal(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": code
                })
            }
            Error::Config(_) => {
                serde_json::json!({
                    "error": "Configuration error",
                    "code": code
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
