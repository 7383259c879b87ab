//! Manifest validation: every referenced column exists and paths are unique.

use crate::config::FullConfig;
use crate::error::ConfigError;
use std::collections::HashSet;

const KNOWN_TYPES: &[&str] = &[
    "uuid",
    "text",
    "boolean",
    "integer",
    "bigint",
    "serial",
    "bigserial",
    "date",
    "timestamptz",
    "jsonb",
];

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    if config.schema.trim().is_empty() {
        return Err(ConfigError::Validation("schema name must not be empty".into()));
    }

    let mut path_segments = HashSet::new();
    for res in &config.resources {
        if !path_segments.insert(res.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(res.path_segment.clone()));
        }

        let mut columns = HashSet::new();
        for c in &res.columns {
            if !columns.insert(c.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "table {} declares column {} twice",
                    res.table, c.name
                )));
            }
            if !KNOWN_TYPES.contains(&c.type_.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "table {} column {} has unsupported type {}",
                    res.table, c.name, c.type_
                )));
            }
        }

        if !columns.contains(res.primary_key.as_str()) {
            return Err(ConfigError::InvalidPrimaryKey {
                table: res.table.clone(),
                column: res.primary_key.clone(),
            });
        }
        if !columns.contains(res.order_by.column.as_str()) {
            return Err(ConfigError::MissingReference {
                kind: "order column",
                id: format!("{}.{}", res.table, res.order_by.column),
            });
        }
        for req in &res.required {
            if !columns.contains(req.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "required column",
                    id: format!("{}.{}", res.table, req),
                });
            }
        }
        for col in &res.update_only {
            if !columns.contains(col.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "update-only column",
                    id: format!("{}.{}", res.table, col),
                });
            }
        }
    }

    Ok(())
}
