//! CrudService: the four-operation resource contract over any `Store`.

mod crud;
pub mod shaping;
mod source;
mod validation;
pub use crud::{parse_id, CrudService};
pub use source::StoreSource;
pub use validation::RequestValidator;
