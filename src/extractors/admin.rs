//! Identify admin callers from the `Authorization: Bearer` header.

use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Who is calling. `admin` is true when the bearer token matches the configured admin token,
/// or when no admin token is configured at all.
#[derive(Clone, Copy, Debug)]
pub struct Caller {
    pub admin: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Ok(Caller { admin: true });
        };
        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(str::trim);
        Ok(Caller {
            admin: presented == Some(expected),
        })
    }
}
