//! Router assembly.

pub mod common;
pub mod docs;
pub mod resource;
pub use common::common_routes;
pub use docs::ApiDoc;
pub use resource::resource_routes;
