//! Session token model and DTOs.

use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `session_tokens` table. One row per login.
#[derive(Debug, Clone, FromRow)]
pub struct SessionToken {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 hex digest of the bearer token handed to the client.
    pub token_hash: String,
    pub valid_until: Timestamp,
    /// Last authenticated request made with this token.
    pub last_seen_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a freshly issued token.
#[derive(Debug, Clone)]
pub struct CreateSessionToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub valid_until: Timestamp,
}
