//! Vote model and DTOs.

use serde::Serialize;
use spooky_core::feedback::VoteType;
use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `votes` table, unique per `(user_id, level_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub level_id: DbId,
    pub vote_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for casting or replacing a vote.
#[derive(Debug, Clone)]
pub struct UpsertVote {
    pub user_id: DbId,
    pub level_id: DbId,
    pub vote_type: VoteType,
}
