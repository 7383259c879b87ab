//! Request validation: required-field presence only.

use crate::error::AppError;
use crate::store::Row;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Every required field must be present, non-null and, for strings, non-blank.
    pub fn validate(body: &Row, required: &[String]) -> Result<(), AppError> {
        for col in required {
            let missing = match body.get(col) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if missing {
                return Err(AppError::BadRequest(format!("{} is required", col)));
            }
        }
        Ok(())
    }
}
