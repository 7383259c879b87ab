//! Payload shaping applied before rows reach the store.

use crate::config::{ColumnInfo, TableSpec};
use crate::store::Row;
use serde_json::Value;

/// Split a comma-separated list, trimming entries and dropping empty ones.
/// `"React, TypeScript,  Tailwind "` → `["React", "TypeScript", "Tailwind"]`.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only the editable columns of `table` present in `body`.
pub fn editable_fields(table: &TableSpec, body: &Row) -> Row {
    pick(table, body, |c| c.editable)
}

/// Like [`editable_fields`], minus the update-only columns.
pub fn creatable_fields(table: &TableSpec, body: &Row) -> Row {
    pick(table, body, |c| c.creatable)
}

fn pick(table: &TableSpec, body: &Row, keep: impl Fn(&ColumnInfo) -> bool) -> Row {
    table
        .columns
        .iter()
        .filter(|c| keep(c))
        .filter_map(|c| body.get(&c.name).map(|v| (c.name.clone(), v.clone())))
        .collect()
}

/// Normalize values by column type: list columns accept a comma-separated string or an
/// array of strings; an empty string on a nullable date column means "no date".
pub fn normalize(table: &TableSpec, row: &mut Row) {
    for c in &table.columns {
        let Some(v) = row.get_mut(&c.name) else { continue };
        match c.pg_type.as_str() {
            "jsonb" => {
                if let Some(list) = normalize_list(v) {
                    *v = list;
                }
            }
            "date" | "timestamptz" if c.nullable => {
                if v.as_str().map(|s| s.trim().is_empty()).unwrap_or(false) {
                    *v = Value::Null;
                }
            }
            _ => {}
        }
    }
}

fn normalize_list(v: &Value) -> Option<Value> {
    match v {
        Value::String(s) => Some(string_list(split_list(s))),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(string_list(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        _ => None,
    }
}

fn string_list(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{bundled_config, resolve};
    use serde_json::json;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(split_list("React, TypeScript,  Tailwind "), ["React", "TypeScript", "Tailwind"]);
        assert_eq!(split_list(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn technologies_string_becomes_list() {
        let model = resolve(&bundled_config().unwrap()).unwrap();
        let projects = model.table_by_path("projects").unwrap();
        let mut row = json!({ "technologies": "React, TypeScript,  Tailwind " })
            .as_object()
            .unwrap()
            .clone();
        normalize(projects, &mut row);
        assert_eq!(row["technologies"], json!(["React", "TypeScript", "Tailwind"]));

        let mut row = json!({ "technologies": [" Rust ", "", "Axum"] }).as_object().unwrap().clone();
        normalize(projects, &mut row);
        assert_eq!(row["technologies"], json!(["Rust", "Axum"]));
    }

    #[test]
    fn empty_end_date_means_ongoing() {
        let model = resolve(&bundled_config().unwrap()).unwrap();
        let experiences = model.table_by_path("experiences").unwrap();
        let mut row = json!({ "start_date": "2020-01-01", "end_date": "" })
            .as_object()
            .unwrap()
            .clone();
        normalize(experiences, &mut row);
        assert_eq!(row["end_date"], Value::Null);
        assert_eq!(row["start_date"], json!("2020-01-01"));
    }

    #[test]
    fn editable_fields_drop_identity_and_timestamps() {
        let model = resolve(&bundled_config().unwrap()).unwrap();
        let profiles = model.table_by_path("profiles").unwrap();
        let body = json!({
            "id": "x", "email": "a@b.c", "created_at": "2020", "updated_at": "2020", "nickname": "z"
        })
        .as_object()
        .unwrap()
        .clone();
        let fields = editable_fields(profiles, &body);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["email"], json!("a@b.c"));
    }

    #[test]
    fn creatable_fields_drop_update_only_columns() {
        let model = resolve(&bundled_config().unwrap()).unwrap();
        let contact = model.table_by_path("contact").unwrap();
        let body = json!({ "name": "Ada", "message": "hi", "read": true }).as_object().unwrap().clone();
        let fields = creatable_fields(contact, &body);
        assert!(!fields.contains_key("read"));
        assert_eq!(fields["name"], json!("Ada"));
        assert!(editable_fields(contact, &body).contains_key("read"));
    }
}
