//! The CRUD-resource contract: list, create, update, delete against one table.

use crate::config::{PkType, TableSpec};
use crate::error::AppError;
use crate::service::shaping::{creatable_fields, editable_fields, normalize};
use crate::service::RequestValidator;
use crate::store::{now_timestamp, Row, Store};
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// All rows in natural order. Singleton tables answer with the first row or `null`.
    pub async fn list(store: &dyn Store, table: &TableSpec) -> Result<Value, AppError> {
        let rows = Self::list_rows(store, table).await?;
        if table.singleton {
            return Ok(rows.into_iter().next().map(Value::Object).unwrap_or(Value::Null));
        }
        Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
    }

    pub async fn list_rows(store: &dyn Store, table: &TableSpec) -> Result<Vec<Row>, AppError> {
        let limit = if table.singleton { Some(1) } else { None };
        Ok(store.select(table, limit).await?)
    }

    /// Insert one row built from the creatable fields of `body`. Returns the stored row.
    pub async fn create(store: &dyn Store, table: &TableSpec, body: &Row) -> Result<Row, AppError> {
        let mut fields = creatable_fields(table, body);
        normalize(table, &mut fields);
        RequestValidator::validate(&fields, &table.required)?;
        Ok(store.insert(table, &fields).await?)
    }

    /// Update the row named by `body.id` with the editable fields present in `body`.
    /// Stamps `updated_at` on tables that carry it.
    pub async fn update(store: &dyn Store, table: &TableSpec, body: &Row) -> Result<Row, AppError> {
        let raw_id = match body.get("id") {
            None | Some(Value::Null) => return Err(AppError::BadRequest("ID is required".into())),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let id = parse_id(&raw_id, &table.pk_type)?;

        let mut changes = editable_fields(table, body);
        normalize(table, &mut changes);
        if table.has_column("updated_at") {
            changes.insert("updated_at".into(), Value::String(now_timestamp()));
        }

        store
            .update(table, &id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no {} row with id {}", table.table_name, raw_id)))
    }

    /// Delete by id; a missing id is a client error, an unmatched id is still a success.
    pub async fn delete(store: &dyn Store, table: &TableSpec, id: Option<&str>) -> Result<(), AppError> {
        let raw_id = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("ID is required".into()))?;
        let id = parse_id(raw_id, &table.pk_type)?;
        Ok(store.delete(table, &id).await?)
    }
}

pub fn parse_id(id_str: &str, pk_type: &PkType) -> Result<Value, AppError> {
    Ok(match pk_type {
        PkType::Uuid => {
            let u = uuid::Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid uuid".into()))?;
            Value::String(u.to_string())
        }
        PkType::BigInt => {
            let n: i64 = id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))?;
            Value::Number(n.into())
        }
        PkType::Text => Value::String(id_str.to_string()),
    })
}
