//! User administration DTOs

use serde::Deserialize;
use utoipa::ToSchema;

/// Request to change a user's role
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    /// One of: "admin", "host", "guest"
    pub role: String,
}
