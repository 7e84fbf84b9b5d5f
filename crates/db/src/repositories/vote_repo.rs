//! Repository for the `votes` table.

use spooky_core::types::DbId;
use sqlx::PgPool;

use crate::models::vote::{UpsertVote, Vote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, level_id, vote_type, created_at, updated_at";

/// Provides data access for votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast or replace a vote.
    ///
    /// Uses `ON CONFLICT (user_id, level_id) DO UPDATE` so exactly one row
    /// per voter and level exists afterwards, carrying the latest type.
    pub async fn upsert(pool: &PgPool, input: &UpsertVote) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (user_id, level_id, vote_type)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_votes_user_level DO UPDATE SET
                 vote_type = EXCLUDED.vote_type
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(input.user_id)
            .bind(input.level_id)
            .bind(input.vote_type.name())
            .fetch_one(pool)
            .await
    }

    /// All votes cast on a level.
    pub async fn list_by_level(pool: &PgPool, level_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE level_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Vote>(&query)
            .bind(level_id)
            .fetch_all(pool)
            .await
    }
}
