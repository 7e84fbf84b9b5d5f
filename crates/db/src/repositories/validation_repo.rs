//! Repository for the `validations` table.

use spooky_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::validation::{UpsertValidation, Validation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, level_id, level_version, validator_id, result, created_at, updated_at";

/// Provides data access for validation verdicts.
pub struct ValidationRepo;

impl ValidationRepo {
    /// Record a verdict for `(level_id, level_version)`.
    ///
    /// Uses `ON CONFLICT (level_id, level_version) DO UPDATE`: re-validating
    /// the same version overwrites validator and result in place (last write
    /// wins) and keeps the row id.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &UpsertValidation,
    ) -> Result<Validation, sqlx::Error> {
        let query = format!(
            "INSERT INTO validations (level_id, level_version, validator_id, result)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_validations_level_version DO UPDATE SET
                 validator_id = EXCLUDED.validator_id,
                 result = EXCLUDED.result
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Validation>(&query)
            .bind(input.level_id)
            .bind(input.level_version)
            .bind(input.validator_id)
            .bind(input.result.name())
            .fetch_one(conn)
            .await
    }

    /// Find a verdict by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Validation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM validations WHERE id = $1");
        sqlx::query_as::<_, Validation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All verdicts retained for a level, newest version first.
    pub async fn list_by_level(
        pool: &PgPool,
        level_id: DbId,
    ) -> Result<Vec<Validation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validations WHERE level_id = $1 ORDER BY level_version DESC"
        );
        sqlx::query_as::<_, Validation>(&query)
            .bind(level_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a verdict. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM validations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
