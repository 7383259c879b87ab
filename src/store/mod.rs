//! The relational store behind every resource: one trait, a Postgres and an in-memory backend.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::config::TableSpec;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// One table row as column name → JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Table-level primitives (select/insert/update/delete filtered by primary key).
/// Every call is a single statement; no multi-row atomicity is assumed.
#[async_trait]
pub trait Store: Send + Sync {
    /// All rows in the table's natural order, at most `limit` of them.
    async fn select(&self, table: &TableSpec, limit: Option<u32>) -> Result<Vec<Row>, StoreError>;

    /// Insert one row and return it as stored (ids, defaults and timestamps filled in).
    async fn insert(&self, table: &TableSpec, row: &Row) -> Result<Row, StoreError>;

    /// Apply `changes` to the row with primary key `id`. `None` when no row matched.
    async fn update(&self, table: &TableSpec, id: &Value, changes: &Row) -> Result<Option<Row>, StoreError>;

    /// Delete the row with primary key `id`; deleting a missing row is not an error.
    async fn delete(&self, table: &TableSpec, id: &Value) -> Result<(), StoreError>;

    /// Round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Timestamp format written by the application (RFC 3339, microseconds, `Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
