//! In-process store with the same row semantics as the Postgres tables: column defaults,
//! type casts, NOT NULL checks, natural ordering. Used when no store URL is configured and by tests.

use super::{now_timestamp, Row, Store};
use crate::config::{ColumnDefaultConfig, ColumnInfo, TableSpec};
use crate::error::StoreError;
use crate::sql::text_form;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    next_serial: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".into())
    }

    fn default_value(&self, column: &ColumnInfo) -> Option<Value> {
        if column.is_serial() {
            let next = self.next_serial.fetch_add(1, AtomicOrdering::SeqCst) + 1;
            return Some(Value::Number(next.into()));
        }
        match column.default.as_ref()? {
            ColumnDefaultConfig::Expression { expression } => match expression.to_lowercase().as_str() {
                "gen_random_uuid()" => Some(Value::String(uuid::Uuid::new_v4().to_string())),
                "now()" | "current_timestamp" => Some(Value::String(now_timestamp())),
                _ => None,
            },
            ColumnDefaultConfig::Literal(lit) => Some(literal_value(column, lit)),
        }
    }
}

/// Interpret a manifest literal according to the column type.
fn literal_value(column: &ColumnInfo, lit: &str) -> Value {
    match column.pg_type.as_str() {
        "boolean" => Value::Bool(lit.eq_ignore_ascii_case("true")),
        "integer" | "bigint" => lit
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .unwrap_or_else(|_| Value::String(lit.to_string())),
        "jsonb" => serde_json::from_str(lit).unwrap_or_else(|_| Value::String(lit.to_string())),
        _ => Value::String(lit.to_string()),
    }
}

fn invalid_input(type_name: &str, text: &str) -> StoreError {
    StoreError::Rejected(format!("invalid input syntax for type {}: \"{}\"", type_name, text))
}

fn out_of_range(type_name: &str, text: &str) -> StoreError {
    StoreError::Rejected(format!("value \"{}\" is out of range for type {}", text, type_name))
}

/// Cast a submitted value into the column type, as `$n::type` does for the text form of the value.
/// Returns the value the way Postgres would hand it back.
fn cast(column: &ColumnInfo, value: &Value) -> Result<Value, StoreError> {
    if column.pg_type == "jsonb" {
        return Ok(value.clone());
    }
    let Some(text) = text_form(value) else {
        return Ok(Value::Null);
    };
    match column.cast_type() {
        "boolean" => match text.trim().to_ascii_lowercase().as_str() {
            "t" | "true" | "y" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "f" | "false" | "n" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid_input("boolean", &text)),
        },
        "integer" => {
            let n: i64 = text.trim().parse().map_err(|_| invalid_input("integer", &text))?;
            i32::try_from(n).map_err(|_| out_of_range("integer", &text))?;
            Ok(Value::Number(n.into()))
        }
        "bigint" => {
            let n: i64 = text.trim().parse().map_err(|_| invalid_input("bigint", &text))?;
            Ok(Value::Number(n.into()))
        }
        "uuid" => uuid::Uuid::parse_str(text.trim())
            .map(|u| Value::String(u.to_string()))
            .map_err(|_| invalid_input("uuid", &text)),
        "date" => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .map_err(|_| invalid_input("date", &text)),
        "timestamptz" => DateTime::parse_from_rfc3339(text.trim())
            .map(|t| Value::String(t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Micros, true)))
            .map_err(|_| invalid_input("timestamp with time zone", &text)),
        _ => Ok(Value::String(text)),
    }
}

fn not_null_violation(column: &str, table: &str) -> StoreError {
    StoreError::Rejected(format!(
        "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
        column, table
    ))
}

/// NULLs sort after everything else, as in PostgreSQL's default ordering.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn same_id(row: &Row, pk: &str, id: &Value) -> bool {
    match (row.get(pk), id) {
        (Some(Value::Number(a)), Value::Number(b)) => a.as_i64() == b.as_i64(),
        (Some(Value::String(a)), Value::String(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, table: &TableSpec, limit: Option<u32>) -> Result<Vec<Row>, StoreError> {
        let guard = self.tables.read().map_err(|_| Self::poisoned())?;
        let mut rows = guard.get(&table.table_name).cloned().unwrap_or_default();
        drop(guard);

        let col = &table.order.column;
        if table.order.descending {
            // Reverse first so that ties keep the most recent insert in front.
            rows.reverse();
            rows.sort_by(|a, b| {
                compare_values(b.get(col).unwrap_or(&Value::Null), a.get(col).unwrap_or(&Value::Null))
            });
        } else {
            rows.sort_by(|a, b| {
                compare_values(a.get(col).unwrap_or(&Value::Null), b.get(col).unwrap_or(&Value::Null))
            });
        }
        if let Some(n) = limit {
            rows.truncate(n as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &TableSpec, row: &Row) -> Result<Row, StoreError> {
        let mut stored = Row::new();
        for c in &table.columns {
            let value = match row.get(&c.name) {
                Some(v) => cast(c, v)?,
                None => self.default_value(c).unwrap_or(Value::Null),
            };
            if value.is_null() && !c.nullable {
                return Err(not_null_violation(&c.name, &table.table_name));
            }
            stored.insert(c.name.clone(), value);
        }

        let mut guard = self.tables.write().map_err(|_| Self::poisoned())?;
        let rows = guard.entry(table.table_name.clone()).or_default();
        if let Some(id) = stored.get(&table.pk_column) {
            if rows.iter().any(|r| same_id(r, &table.pk_column, id)) {
                return Err(StoreError::Rejected(format!(
                    "duplicate key value violates unique constraint \"{}_pkey\"",
                    table.table_name
                )));
            }
        }
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: &TableSpec, id: &Value, changes: &Row) -> Result<Option<Row>, StoreError> {
        let mut guard = self.tables.write().map_err(|_| Self::poisoned())?;
        let Some(row) = guard
            .get_mut(&table.table_name)
            .and_then(|rows| rows.iter_mut().find(|r| same_id(r, &table.pk_column, id)))
        else {
            return Ok(None);
        };

        let mut cast_changes = Vec::new();
        for c in &table.columns {
            if c.name == table.pk_column {
                continue;
            }
            let Some(v) = changes.get(&c.name) else { continue };
            let v = cast(c, v)?;
            if v.is_null() && !c.nullable {
                return Err(not_null_violation(&c.name, &table.table_name));
            }
            cast_changes.push((c.name.clone(), v));
        }
        row.extend(cast_changes);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: &TableSpec, id: &Value) -> Result<(), StoreError> {
        let mut guard = self.tables.write().map_err(|_| Self::poisoned())?;
        if let Some(rows) = guard.get_mut(&table.table_name) {
            rows.retain(|r| !same_id(r, &table.pk_column, id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.tables.read().map(|_| ()).map_err(|_| Self::poisoned())
    }
}
