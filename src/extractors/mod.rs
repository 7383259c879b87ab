//! Request extractors.

mod admin;
pub use admin::{Caller, BEARER_PREFIX};
