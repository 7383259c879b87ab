//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and DDL from a resolved table.

use super::PgBindValue;
use crate::config::{ColumnDefaultConfig, ColumnInfo, TableSpec};
use crate::store::Row;
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from the manifest).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(table: &TableSpec) -> String {
    format!("{}.{}", quoted(&table.schema_name), quoted(&table.table_name))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
    /// Cast type of each placeholder, parallel to `params`.
    pub casts: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            casts: Vec::new(),
        }
    }

    /// Push a value and return its `$n::type` placeholder.
    fn push_param(&mut self, v: Value, column: &ColumnInfo) -> String {
        self.params.push(v);
        self.casts.push(column.cast_type().to_string());
        format!("${}::{}", self.params.len(), column.cast_type())
    }

    /// Parameters ready to bind, in placeholder order.
    pub fn binds(&self) -> impl Iterator<Item = PgBindValue> + '_ {
        self.params
            .iter()
            .zip(&self.casts)
            .map(|(v, cast)| PgBindValue::new(v, cast))
    }
}

fn select_column_list(table: &TableSpec) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT all columns ordered by the table's natural order, with an optional LIMIT.
pub fn select_list(table: &TableSpec, limit: Option<u32>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let direction = if table.order.descending { " DESC" } else { "" };
    let limit_clause = limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}{}{}",
        select_column_list(table),
        qualified_table(table),
        quoted(&table.order.column),
        direction,
        limit_clause
    );
    q
}

/// SELECT by primary key. Caller binds the id as sole param.
pub fn select_by_id(table: &TableSpec, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = pk_column(table);
    let ph = q.push_param(id.clone(), pk);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(table),
        qualified_table(table),
        quoted(&pk.name),
        ph
    );
    q
}

/// INSERT the columns present in `row`; absent columns fall back to the store default.
/// Absent columns without a default are sent as NULL so the store reports the violation itself.
pub fn insert(table: &TableSpec, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &table.columns {
        let val = row.get(&c.name).cloned();
        if val.is_none() && c.has_default() {
            continue;
        }
        let ph = q.push_param(val.unwrap_or(Value::Null), c);
        cols.push(quoted(&c.name));
        placeholders.push(ph);
    }
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            qualified_table(table),
            select_column_list(table)
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            qualified_table(table),
            cols.join(", "),
            placeholders.join(", "),
            select_column_list(table)
        )
    };
    q
}

/// UPDATE by id: SET only the table columns present in `changes`.
/// With nothing to set, degrades to a SELECT of the row so callers still get it back.
pub fn update(table: &TableSpec, id: &Value, changes: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in &table.columns {
        if c.name == table.pk_column {
            continue;
        }
        let Some(v) = changes.get(&c.name) else { continue };
        let ph = q.push_param(v.clone(), c);
        sets.push(format!("{} = {}", quoted(&c.name), ph));
    }
    if sets.is_empty() {
        return select_by_id(table, id);
    }
    let pk = pk_column(table);
    let id_ph = q.push_param(id.clone(), pk);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        qualified_table(table),
        sets.join(", "),
        quoted(&pk.name),
        id_ph,
        select_column_list(table)
    );
    q
}

/// DELETE by id.
pub fn delete(table: &TableSpec, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = pk_column(table);
    let ph = q.push_param(id.clone(), pk);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", qualified_table(table), quoted(&pk.name), ph);
    q
}

/// CREATE SCHEMA IF NOT EXISTS for the table's schema.
pub fn create_schema(table: &TableSpec) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&table.schema_name))
}

/// CREATE TABLE IF NOT EXISTS with column types, NOT NULL, defaults and the primary key.
pub fn create_table(table: &TableSpec) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quoted(&c.name), c.pg_type.to_uppercase());
            if !c.nullable {
                def.push_str(" NOT NULL");
            }
            match &c.default {
                Some(ColumnDefaultConfig::Expression { expression }) => {
                    def.push_str(&format!(" DEFAULT {}", expression));
                }
                Some(ColumnDefaultConfig::Literal(lit)) => {
                    def.push_str(&format!(" DEFAULT '{}'", lit.replace('\'', "''")));
                }
                None => {}
            }
            def
        })
        .collect();
    defs.push(format!("PRIMARY KEY ({})", quoted(&table.pk_column)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        qualified_table(table),
        defs.join(",\n    ")
    )
}

/// Index on the ordering column, skipped when it is the primary key.
pub fn create_order_index(table: &TableSpec) -> Option<String> {
    if table.order.column == table.pk_column {
        return None;
    }
    Some(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quoted(&format!("{}_{}_idx", table.table_name, table.order.column)),
        qualified_table(table),
        quoted(&table.order.column)
    ))
}

fn pk_column(table: &TableSpec) -> &ColumnInfo {
    table
        .column(&table.pk_column)
        .unwrap_or(&table.columns[0])
}
