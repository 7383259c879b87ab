//! Response bodies shared by several routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned by delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub const OK: Ack = Ack { success: true };
}
