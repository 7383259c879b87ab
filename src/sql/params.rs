//! Convert serde_json::Value to a value sqlx can bind.
//!
//! Every parameter goes over the wire as TEXT and the `$n::type` cast in the statement converts
//! it. The declared parameter type therefore depends only on the statement, never on the value,
//! which keeps cached prepared statements valid across requests.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// Text form of a JSON value as Postgres would read it for a scalar column: strings as-is,
/// everything else as its JSON rendering. `None` for null.
pub fn text_form(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    Text(String),
}

impl PgBindValue {
    /// Bind `v` for a placeholder cast to `cast_type`. jsonb placeholders always get the JSON
    /// rendering, so a bare string stays a JSON string.
    pub fn new(v: &Value, cast_type: &str) -> Self {
        if v.is_null() {
            return PgBindValue::Null;
        }
        let text = if cast_type == "jsonb" {
            Some(v.to_string())
        } else {
            text_form(v)
        };
        text.map(PgBindValue::Text).unwrap_or(PgBindValue::Null)
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null => IsNull::Yes,
            PgBindValue::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(PgTypeInfo::with_name("TEXT"))
    }
}

impl sqlx::Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_bind_as_their_text_form() {
        assert_eq!(PgBindValue::new(&Value::Null, "integer"), PgBindValue::Null);
        assert_eq!(PgBindValue::new(&json!(true), "boolean"), PgBindValue::Text("true".into()));
        assert_eq!(PgBindValue::new(&json!(3), "integer"), PgBindValue::Text("3".into()));
        assert_eq!(PgBindValue::new(&json!("Rust"), "text"), PgBindValue::Text("Rust".into()));
    }

    #[test]
    fn wire_type_does_not_depend_on_the_value() {
        let id = uuid::Uuid::new_v4().to_string();
        for v in [Value::Null, json!(7), json!(false), json!(id), json!(["a"])] {
            assert_eq!(PgBindValue::new(&v, "text").produces(), Some(PgTypeInfo::with_name("TEXT")));
        }
    }

    #[test]
    fn jsonb_binds_json_rendering() {
        assert_eq!(
            PgBindValue::new(&json!(["React", "Axum"]), "jsonb"),
            PgBindValue::Text(r#"["React","Axum"]"#.into())
        );
        assert_eq!(PgBindValue::new(&json!("React"), "jsonb"), PgBindValue::Text(r#""React""#.into()));
    }
}
