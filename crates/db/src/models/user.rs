//! User entity model and DTOs.

use serde::Serialize;
use spooky_core::error::CoreError;
use spooky_core::platform::PlatformType;
use spooky_core::roles::Role;
use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub platform_type: String,
    pub platform_user_id: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Parsed role. A value outside the closed set is an internal error,
    /// since the column is constrained by a `CHECK`.
    pub fn role(&self) -> Result<Role, CoreError> {
        Role::from_name(&self.role)
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub platform_type: PlatformType,
    pub platform_user_id: String,
    pub display_name: String,
}
