//! Repository for the `session_tokens` table.

use spooky_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session_token::{CreateSessionToken, SessionToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, token_hash, valid_until, last_seen_at, created_at, updated_at";

/// Provides data access for session tokens.
pub struct SessionTokenRepo;

impl SessionTokenRepo {
    /// Persist a newly issued token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSessionToken,
    ) -> Result<SessionToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO session_tokens (user_id, token_hash, valid_until)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.valid_until)
            .fetch_one(pool)
            .await
    }

    /// Find a live (not expired) token row by its hash.
    pub async fn find_live_by_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<SessionToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_tokens
             WHERE token_hash = $1 AND valid_until > NOW()"
        );
        sqlx::query_as::<_, SessionToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Record activity on a token. Returns `true` if the row was updated.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE session_tokens SET last_seen_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite a live token row in place with a newly issued token.
    ///
    /// Returns `None` if `old_hash` does not identify a live row, e.g. it
    /// expired, was logged out, or was already rotated by a concurrent call.
    pub async fn rotate(
        pool: &PgPool,
        old_hash: &str,
        new_hash: &str,
        valid_until: Timestamp,
    ) -> Result<Option<SessionToken>, sqlx::Error> {
        let query = format!(
            "UPDATE session_tokens SET
                token_hash = $2,
                valid_until = $3,
                last_seen_at = NOW()
             WHERE token_hash = $1 AND valid_until > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionToken>(&query)
            .bind(old_hash)
            .bind(new_hash)
            .bind(valid_until)
            .fetch_optional(pool)
            .await
    }

    /// Delete the row matching `(user_id, token_hash)`. Returns `true` if a
    /// row was deleted; deleting an absent row is not an error.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM session_tokens WHERE user_id = $1 AND token_hash = $2")
                .bind(user_id)
                .bind(token_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete rows that expired before `cutoff`. Returns the count deleted.
    pub async fn delete_expired(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session_tokens WHERE valid_until < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List all token rows of a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SessionToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM session_tokens WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SessionToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
