//! Repository for the `users` table.

use spooky_core::platform::PlatformType;
use spooky_core::roles::Role;
use spooky_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, platform_type, platform_user_id, display_name, role, created_at, updated_at";

/// Provides data access for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with the default `player` role.
    ///
    /// Returns `None` when the `(platform_type, platform_user_id)` identity
    /// is already taken.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (platform_type, platform_user_id, display_name)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_users_platform_identity DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.platform_type.name())
            .bind(&input.platform_user_id)
            .bind(&input.display_name)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by its platform identity.
    pub async fn find_by_platform_identity(
        pool: &PgPool,
        platform_type: PlatformType,
        platform_user_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE platform_type = $1 AND platform_user_id = $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(platform_type.name())
            .bind(platform_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Change a user's role. Roles are granted out of band; there is no
    /// HTTP surface for this.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_role(pool: &PgPool, id: DbId, role: Role) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role.name())
            .fetch_optional(pool)
            .await
    }
}
