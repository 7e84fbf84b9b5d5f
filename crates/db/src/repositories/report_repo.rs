//! Repository for the `reports` table.
//!
//! [`ReportRepo::count_for_level`] is the hook a future report threshold
//! policy consumes. Nothing hides content based on it.

use spooky_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{Report, UpsertReport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, level_id, created_at, updated_at";

/// Provides data access for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Raise a report. Repeating it touches the existing row and returns it.
    pub async fn upsert(pool: &PgPool, input: &UpsertReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (user_id, level_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_reports_user_level DO UPDATE SET
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.user_id)
            .bind(input.level_id)
            .fetch_one(pool)
            .await
    }

    /// Number of distinct reporters on a level.
    pub async fn count_for_level(pool: &PgPool, level_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports WHERE level_id = $1")
            .bind(level_id)
            .fetch_one(pool)
            .await
    }
}
