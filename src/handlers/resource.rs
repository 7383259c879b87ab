//! Resource handlers: list, create, update, delete on `/api/:resource`.

use crate::config::{Operation, TableSpec};
use crate::error::{AppError, ErrorBody};
use crate::extractors::Caller;
use crate::response::Ack;
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::Row;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Resolve the table behind `path_segment` and check the caller may run `op` on it.
fn authorize<'a>(state: &'a AppState, path_segment: &str, caller: Caller, op: Operation) -> Result<&'a TableSpec, AppError> {
    let table = state
        .model
        .table_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("unknown resource: {}", path_segment)))?;
    if !caller.admin && !table.is_public(op) {
        tracing::warn!(resource = %path_segment, operation = %op, "admin operation without credentials");
        return Err(AppError::Unauthorized);
    }
    Ok(table)
}

fn body_to_row(value: Value) -> Result<Row, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// All rows in natural order; the singleton profile answers with one object or `null`.
#[utoipa::path(
    get,
    path = "/api/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "profiles, skills, projects, experiences or contact")),
    responses(
        (status = 200, description = "Rows in natural order"),
        (status = 401, description = "Admin token required", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    caller: Caller,
) -> Result<impl IntoResponse, AppError> {
    let table = authorize(&state, &path_segment, caller, Operation::List)?;
    let body = CrudService::list(state.store.as_ref(), table).await?;
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "profiles, skills, projects, experiences or contact")),
    request_body(content = Object, description = "Editable fields of the row"),
    responses(
        (status = 201, description = "Created row with id and timestamps"),
        (status = 400, description = "Missing required field", body = ErrorBody),
        (status = 401, description = "Admin token required", body = ErrorBody),
        (status = 500, description = "Store rejected the insert", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    caller: Caller,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let table = authorize(&state, &path_segment, caller, Operation::Create)?;
    let body = body_to_row(body)?;
    let row = CrudService::create(state.store.as_ref(), table, &body).await?;
    let id = row.get(&table.pk_column).cloned().unwrap_or_default();
    tracing::info!(resource = %path_segment, id = %id, "row created");
    Ok((StatusCode::CREATED, Json(Value::Object(row))))
}

#[utoipa::path(
    put,
    path = "/api/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "profiles, skills, projects, experiences or contact")),
    request_body(content = Object, description = "`id` plus the editable fields to change"),
    responses(
        (status = 200, description = "Updated row"),
        (status = 400, description = "Missing or invalid id", body = ErrorBody),
        (status = 401, description = "Admin token required", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 500, description = "Store rejected the update", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    caller: Caller,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let table = authorize(&state, &path_segment, caller, Operation::Update)?;
    let body = body_to_row(body)?;
    let row = CrudService::update(state.store.as_ref(), table, &body).await?;
    Ok(Json(Value::Object(row)))
}

#[utoipa::path(
    delete,
    path = "/api/{resource}",
    tag = "resources",
    params(
        ("resource" = String, Path, description = "profiles, skills, projects, experiences or contact"),
        ("id" = String, Query, description = "Primary key of the row")
    ),
    responses(
        (status = 200, description = "Deleted, or nothing to delete", body = Ack),
        (status = 400, description = "Missing or invalid id", body = ErrorBody),
        (status = 401, description = "Admin token required", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    caller: Caller,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let table = authorize(&state, &path_segment, caller, Operation::Delete)?;
    CrudService::delete(state.store.as_ref(), table, params.get("id").map(String::as_str)).await?;
    Ok(Json(Ack::OK))
}
