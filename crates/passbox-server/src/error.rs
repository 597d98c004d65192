//! HTTP error types for the passbox server.
//!
//! Maps domain errors from `passbox-core` into HTTP responses. Every
//! error produces a JSON body with a machine-readable `error` field and
//! a human-readable `message`. Internal failures are logged in full here
//! and surfaced with a generic message that omits the detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use passbox_core::error::{AccountError, RecordError, ValidationError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client fault: validation failure, duplicate account, bad
    /// credentials, or unknown record. The message is sent verbatim.
    BadRequest(String),
    /// Storage or programming failure. The detail is logged; the client
    /// sees only a generic message.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(detail) => {
                error!(detail = %detail, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error. Try again in a minute.".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Duplicate
            | AccountError::InvalidCredentials
            | AccountError::InvalidHardwareId => Self::BadRequest(err.to_string()),
            AccountError::Internal { .. } | AccountError::Store(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Account(inner) => Self::from(inner),
            RecordError::NotFound { .. } => Self::BadRequest(err.to_string()),
            RecordError::Internal { .. } | RecordError::Store(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
