//! Record routes: `PUT /{hardware_id}/{url}` and `POST /{hardware_id}/{url}`.
//!
//! PUT stores the `store` object for the pair; POST retrieves it. Both
//! carry the account password in the body and are re-verified by the
//! record gateway before storage is touched.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::put;
use axum::{Json, Router};
use serde_json::Value;

use passbox_core::schema::{FieldKind, FieldSpec, Schema};

use crate::error::AppError;
use crate::routes::{as_object, object_field, str_field};
use crate::state::AppState;

/// Build the record router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/{hardware_id}/{url}",
        put(put_record).post(get_record),
    )
}

fn put_schema() -> Schema {
    Schema::new([
        ("password", FieldSpec::required(FieldKind::String)),
        ("store", FieldSpec::required(FieldKind::Object)),
    ])
}

fn get_schema() -> Schema {
    Schema::new([("password", FieldSpec::required(FieldKind::String))])
}

/// Store an info blob for the (hardware ID, URL) pair. Success is a bare
/// 200 with no body.
async fn put_record(
    State(state): State<Arc<AppState>>,
    Path((hardware_id, url)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<StatusCode, AppError> {
    let body = as_object(&body)?;
    put_schema().validate(body)?;

    let password = str_field(body, "password")?;
    let info = object_field(body, "store")?;

    state.records.put(&hardware_id, &url, password, info).await?;
    Ok(StatusCode::OK)
}

/// Fetch the info blob stored for the (hardware ID, URL) pair.
async fn get_record(
    State(state): State<Arc<AppState>>,
    Path((hardware_id, url)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let body = as_object(&body)?;
    get_schema().validate(body)?;

    let password = str_field(body, "password")?;

    let info = state.records.get(&hardware_id, &url, password).await?;
    Ok(Json(info))
}
