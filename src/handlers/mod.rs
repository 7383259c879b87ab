//! HTTP handlers for the resource endpoints and the public aggregate.

pub mod portfolio;
pub mod resource;
pub use portfolio::*;
pub use resource::*;
