//! Resolved resource model: manifest validated and flattened for runtime use.

use crate::config::{ColumnDefaultConfig, Operation};
use std::collections::HashMap;

/// Primary key type for parsing ids from query strings and bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PkType {
    Uuid,
    BigInt,
    Text,
}

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    /// PostgreSQL type as written in the manifest (e.g. "timestamptz", "bigserial").
    pub pg_type: String,
    pub nullable: bool,
    pub default: Option<ColumnDefaultConfig>,
    /// False for the primary key and the store-managed timestamps.
    pub editable: bool,
    /// Accepted in a create payload: editable and not listed as update-only.
    pub creatable: bool,
}

impl ColumnInfo {
    /// Serial columns are filled by the store even without an explicit default.
    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.is_serial()
    }

    pub fn is_serial(&self) -> bool {
        matches!(self.pg_type.as_str(), "serial" | "bigserial")
    }

    /// Type name usable in a `$n::type` cast.
    pub fn cast_type(&self) -> &str {
        match self.pg_type.as_str() {
            "bigserial" => "bigint",
            "serial" => "integer",
            other => other,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

#[derive(Clone, Debug)]
pub struct TableSpec {
    pub schema_name: String,
    pub table_name: String,
    pub path_segment: String,
    pub pk_column: String,
    pub pk_type: PkType,
    pub columns: Vec<ColumnInfo>,
    pub order: OrderBy,
    pub singleton: bool,
    pub public_operations: Vec<Operation>,
    pub required: Vec<String>,
}

impl TableSpec {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn is_public(&self, op: Operation) -> bool {
        self.public_operations.contains(&op)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub tables: Vec<TableSpec>,
    pub table_by_path: HashMap<String, TableSpec>,
}

impl ResolvedModel {
    pub fn table_by_path(&self, path: &str) -> Option<&TableSpec> {
        self.table_by_path.get(path)
    }
}
