//! Account routes: `POST /account/new`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use passbox_core::schema::{FieldKind, FieldSpec, Schema};

use crate::error::AppError;
use crate::routes::{as_object, str_field};
use crate::state::AppState;

/// Build the account router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/account/new", post(create_account))
}

fn new_account_schema() -> Schema {
    Schema::new([
        ("hardware_id", FieldSpec::required(FieldKind::String)),
        ("password", FieldSpec::required(FieldKind::String)),
    ])
}

/// Register a new account. Success is a bare 200 with no body.
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<StatusCode, AppError> {
    let body = as_object(&body)?;
    new_account_schema().validate(body)?;

    let hardware_id = str_field(body, "hardware_id")?;
    let password = str_field(body, "password")?;

    state.accounts.register(hardware_id, password).await?;
    Ok(StatusCode::OK)
}
