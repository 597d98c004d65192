//! HTTP routes for the passbox server.
//!
//! Two route groups: account registration (`/account/new`) and record
//! get/set (`/{hardware_id}/{url}`). Handlers take the raw JSON body so
//! the schema validator can see extra fields, then hand validated fields
//! to the core.

pub mod accounts;
pub mod records;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use serde_json::Value;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use passbox_core::error::ValidationError;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router with middleware layers.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(accounts::router())
        .merge(records::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// View a request body as a JSON object, rejecting arrays, strings, and
/// other non-object bodies before schema validation.
pub(crate) fn as_object(body: &Value) -> Result<&serde_json::Map<String, Value>, AppError> {
    body.as_object()
        .ok_or(AppError::from(ValidationError::NotAnObject))
}

/// Extract a string field from an already-validated body.
///
/// The error branch is unreachable after schema validation; it exists so
/// a validator/extractor mismatch shows up as a 500, not a panic.
pub(crate) fn str_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, AppError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Internal(format!("validated field '{field}' is not a string")))
}

/// Extract an object field from an already-validated body.
pub(crate) fn object_field(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<serde_json::Map<String, Value>, AppError> {
    object
        .get(field)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("validated field '{field}' is not an object")))
}
