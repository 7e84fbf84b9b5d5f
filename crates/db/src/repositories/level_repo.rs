//! Repository for the `levels` table.
//!
//! Holds the two moderation writes that must be atomic: lock acquisition
//! (one conditional `UPDATE`) and verdict application (a version-guarded
//! `UPDATE` run inside the caller's transaction).

use spooky_core::pagination::Page;
use spooky_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::level::{
    ApplyValidation, CreateLevel, Level, ModerationFilter, ModerationLevel, UpdateLevelContent,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, content, thumbnail, author_score, version, \
    validation_id, lock_holder_id, locked_at, edited_at, published_at, created_at, updated_at";

/// Column list qualified with the `l` alias, for JOIN queries.
const L_COLUMNS: &str = "l.id, l.user_id, l.name, l.content, l.thumbnail, l.author_score, \
    l.version, l.validation_id, l.lock_holder_id, l.locked_at, l.edited_at, l.published_at, \
    l.created_at, l.updated_at";

/// Publicly visible levels: the pointed verdict is `ok` and was issued for
/// the version immediately preceding the current one. Stale verdicts never
/// publish.
const PUBLIC_FROM_WHERE: &str = "FROM levels l
     JOIN validations v ON v.id = l.validation_id
     WHERE v.result = 'ok' AND v.level_version + 1 = l.version";

/// Moderation visibility. `$1` restricts to levels needing review; `$2`/`$3`
/// hide levels under a fresh lock held by someone other than `$2`.
const MODERATION_WHERE: &str = "WHERE (NOT $1 OR l.validation_id IS NULL OR l.edited_at IS NOT NULL)
       AND ($2::uuid IS NULL
            OR l.lock_holder_id IS NULL
            OR l.lock_holder_id = $2
            OR l.locked_at <= $3::timestamptz)";

/// Provides data access for levels.
pub struct LevelRepo;

impl LevelRepo {
    /// Insert a new level at version 0, unvalidated and unlocked.
    pub async fn create(pool: &PgPool, input: &CreateLevel) -> Result<Level, sqlx::Error> {
        let query = format!(
            "INSERT INTO levels (user_id, name, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a level by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels WHERE id = $1");
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a level and lock its row until the surrounding transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Apply an owner edit. Leaves `version` and `validation_id` untouched
    /// and marks the level as edited since its verdict.
    ///
    /// Returns `None` if no level with `id` is owned by `owner_id`.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateLevelContent,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!(
            "UPDATE levels SET
                name = $3,
                content = $4,
                edited_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a level (votes, reports and validations cascade).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM levels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically take the validation lock for `holder_id`.
    ///
    /// Succeeds when the level is not validated-and-unchanged and its lock
    /// is absent, already held by `holder_id`, or taken at or before
    /// `stale_before`. Returns `None` when the conditions do not hold (or
    /// the level does not exist); the caller re-reads to classify.
    pub async fn try_acquire_lock(
        pool: &PgPool,
        id: DbId,
        holder_id: DbId,
        now: Timestamp,
        stale_before: Timestamp,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!(
            "UPDATE levels SET
                lock_holder_id = $2,
                locked_at = $3
             WHERE id = $1
               AND NOT (validation_id IS NOT NULL AND edited_at IS NULL)
               AND (lock_holder_id IS NULL OR lock_holder_id = $2 OR locked_at <= $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .bind(holder_id)
            .bind(now)
            .bind(stale_before)
            .fetch_optional(pool)
            .await
    }

    /// Write a verdict onto the level: validator-approved content, score and
    /// thumbnail, the new validation pointer, `version + 1`, and clear the
    /// lock and the edit marker.
    ///
    /// Guarded by `expected_version`; returns `None` if the level moved on
    /// (or vanished) since it was read.
    pub async fn apply_validation(
        conn: &mut PgConnection,
        id: DbId,
        expected_version: i32,
        input: &ApplyValidation,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!(
            "UPDATE levels SET
                content = $3,
                author_score = $4,
                thumbnail = $5,
                published_at = $6,
                validation_id = $7,
                version = version + 1,
                lock_holder_id = NULL,
                locked_at = NULL,
                edited_at = NULL
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&input.content)
            .bind(input.author_score)
            .bind(&input.thumbnail)
            .bind(input.published_at)
            .bind(input.validation_id)
            .fetch_optional(conn)
            .await
    }

    /// Publicly visible levels, newest first.
    pub async fn list_public(pool: &PgPool, page: Page) -> Result<Vec<Level>, sqlx::Error> {
        let query = format!(
            "SELECT {L_COLUMNS} {PUBLIC_FROM_WHERE}
             ORDER BY l.created_at DESC, l.id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of publicly visible levels.
    pub async fn count_public(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) {PUBLIC_FROM_WHERE}");
        sqlx::query_scalar::<_, i64>(&query).fetch_one(pool).await
    }

    /// Levels owned by `owner_id` in any state, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        page: Page,
    ) -> Result<Vec<Level>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM levels
             WHERE user_id = $1
             ORDER BY created_at DESC, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(owner_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of levels owned by `owner_id`.
    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM levels WHERE user_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Levels visible to a moderator under `filter`, with report counts.
    pub async fn list_for_moderation(
        pool: &PgPool,
        filter: &ModerationFilter,
        page: Page,
    ) -> Result<Vec<ModerationLevel>, sqlx::Error> {
        let query = format!(
            "SELECT {L_COLUMNS},
                    (SELECT COUNT(*) FROM reports r WHERE r.level_id = l.id) AS report_count
             FROM levels l
             {MODERATION_WHERE}
             ORDER BY l.created_at DESC, l.id
             LIMIT $4 OFFSET $5"
        );
        let (viewer, stale_before) = split_lock_filter(filter);
        sqlx::query_as::<_, ModerationLevel>(&query)
            .bind(filter.only_needs_review)
            .bind(viewer)
            .bind(stale_before)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of levels visible to a moderator under `filter`.
    pub async fn count_for_moderation(
        pool: &PgPool,
        filter: &ModerationFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM levels l {MODERATION_WHERE}");
        let (viewer, stale_before) = split_lock_filter(filter);
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.only_needs_review)
            .bind(viewer)
            .bind(stale_before)
            .fetch_one(pool)
            .await
    }
}

fn split_lock_filter(filter: &ModerationFilter) -> (Option<DbId>, Option<Timestamp>) {
    match filter.hide_locked_for {
        Some((viewer, stale_before)) => (Some(viewer), Some(stale_before)),
        None => (None, None),
    }
}
