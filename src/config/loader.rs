//! Load the resource manifest (bundled or from a file) and resolve it into the runtime model.

use crate::config::resolved::{ColumnInfo, OrderBy, PkType, ResolvedModel, TableSpec};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_MANIFEST: &str = include_str!("manifest.json");

/// Columns the store fills and the API never accepts from a payload.
const MANAGED_COLUMNS: &[&str] = &["created_at", "updated_at"];

/// Manifest compiled into the binary: profiles, skills, projects, experiences, contact.
pub fn bundled_config() -> Result<FullConfig, ConfigError> {
    serde_json::from_str(BUNDLED_MANIFEST).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Read a manifest from disk (same JSON shape as the bundled one).
pub async fn load_from_path(path: &Path) -> Result<FullConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Build resolved model from full config.
pub fn resolve(config: &FullConfig) -> Result<ResolvedModel, ConfigError> {
    validate(config)?;

    let mut tables = Vec::with_capacity(config.resources.len());
    let mut table_by_path = HashMap::new();

    for res in &config.resources {
        let pk_col = res
            .columns
            .iter()
            .find(|c| c.name == res.primary_key)
            .ok_or_else(|| ConfigError::InvalidPrimaryKey {
                table: res.table.clone(),
                column: res.primary_key.clone(),
            })?;

        let columns = res
            .columns
            .iter()
            .map(|c| {
                let editable = c.name != res.primary_key && !MANAGED_COLUMNS.contains(&c.name.as_str());
                ColumnInfo {
                    name: c.name.clone(),
                    pg_type: c.type_.to_lowercase(),
                    nullable: c.nullable,
                    default: c.default.clone(),
                    editable,
                    creatable: editable && !res.update_only.contains(&c.name),
                }
            })
            .collect();

        let table = TableSpec {
            schema_name: config.schema.clone(),
            table_name: res.table.clone(),
            path_segment: res.path_segment.clone(),
            pk_column: res.primary_key.clone(),
            pk_type: infer_pk_type(&pk_col.type_),
            columns,
            order: OrderBy {
                column: res.order_by.column.clone(),
                descending: res.order_by.descending,
            },
            singleton: res.singleton,
            public_operations: res.public_operations.clone(),
            required: res.required.clone(),
        };
        table_by_path.insert(res.path_segment.clone(), table.clone());
        tables.push(table);
    }

    Ok(ResolvedModel {
        tables,
        table_by_path,
    })
}

fn infer_pk_type(type_str: &str) -> PkType {
    let type_lower = type_str.to_lowercase();
    if type_lower.contains("uuid") {
        PkType::Uuid
    } else if type_lower.contains("serial") || type_lower.contains("int") {
        PkType::BigInt
    } else {
        PkType::Text
    }
}
