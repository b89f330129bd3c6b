//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! The taxonomy mirrors the service contract: validation failures are
//! user-correctable 400s with a descriptive message; storage failures are
//! 500s carrying only an opaque description. Notification publish failures
//! never become responses at all - the publish is fire-and-forget and its
//! errors are logged where they happen.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the purchase endpoints.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-supplied data missing or malformed. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record store was unavailable or rejected the operation.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Validation messages go to the client verbatim; server errors get
        // a fixed message plus an opaque description string
        let body = match &self {
            Self::Validation(message) => ErrorBody {
                message: message.clone(),
                error: None,
            },
            Self::Storage(_) | Self::Internal(_) => ErrorBody {
                message: "Internal server error".to_string(),
                error: Some(self.to_string()),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
