//! Moderation workflow: validation locks and verdicts.
//!
//! Lock acquisition is a single conditional `UPDATE`; the level is re-read
//! only to explain a refusal. Validation runs in one transaction holding
//! the level row, and advances the version only if nobody else did first.

use chrono::Duration;
use spooky_core::error::CoreError;
use spooky_core::level::{validate_author_score, validate_content, validate_thumbnail};
use spooky_core::moderation::{
    check_acquire_lock, check_validate, is_current_verdict, stale_before, verdict_versions,
    ValidationResult,
};
use spooky_core::policy::{authorize, Action, Ownership};
use spooky_core::types::{DbId, Timestamp};
use spooky_db::models::level::{ApplyValidation, Level};
use spooky_db::models::validation::{UpsertValidation, Validation};
use spooky_db::repositories::{LevelRepo, ValidationRepo};
use sqlx::PgPool;

use super::{ensure_level_exists, level_not_found, Actor};
use crate::error::{AppError, AppResult};

/// Validator-approved values submitted with a verdict.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub content: String,
    pub author_score: i32,
    pub thumbnail: Option<String>,
    pub result: ValidationResult,
}

/// Take (or refresh) the validation lock on a level.
///
/// Refusals: missing level is `NotFound`, a validated and unchanged level
/// is `NotAuthorized`, another holder's fresh lock is `Conflict`.
pub async fn acquire_lock(
    pool: &PgPool,
    actor: Actor,
    level_id: DbId,
    now: Timestamp,
    lock_window: Duration,
) -> AppResult<Level> {
    authorize(
        actor.role,
        Action::AcquireValidationLock,
        Ownership::NotApplicable,
    )?;

    let acquired = LevelRepo::try_acquire_lock(
        pool,
        level_id,
        actor.id,
        now,
        stale_before(now, lock_window),
    )
    .await?;

    if let Some(level) = acquired {
        tracing::info!(user_id = %actor.id, level_id = %level_id, "Validation lock acquired");
        return Ok(level);
    }

    let level = ensure_level_exists(pool, level_id).await?;
    let snapshot = level.moderation_snapshot();
    tracing::debug!(
        user_id = %actor.id,
        level_id = %level_id,
        state = ?snapshot.state(now, lock_window),
        "Validation lock not taken"
    );
    check_acquire_lock(&snapshot, actor.id, now, lock_window)?;

    // The row allowed the lock on re-read, so it changed in between.
    tracing::debug!(user_id = %actor.id, level_id = %level_id, "Lock state changed concurrently");
    Err(AppError::Core(CoreError::Conflict(
        "Level lock changed concurrently, retry".into(),
    )))
}

/// Record a verdict on a level and publish its validator-approved content.
///
/// The verdict is stored at the level's current version `N` and the level
/// moves to `N + 1`. The verdict it replaces is deleted after commit on a
/// best-effort basis.
pub async fn validate(
    pool: &PgPool,
    actor: Actor,
    level_id: DbId,
    verdict: Verdict,
    now: Timestamp,
    lock_window: Duration,
) -> AppResult<Validation> {
    authorize(actor.role, Action::ValidateLevel, Ownership::NotApplicable)?;
    validate_content(&verdict.content)?;
    validate_author_score(verdict.author_score)?;
    validate_thumbnail(verdict.thumbnail.as_deref())?;

    let mut tx = pool.begin().await?;

    let level = LevelRepo::find_by_id_for_update(&mut tx, level_id)
        .await?
        .ok_or_else(|| level_not_found(level_id))?;
    check_validate(
        actor.role,
        &level.moderation_snapshot(),
        actor.id,
        now,
        lock_window,
    )?;

    let (verdict_version, next_version) = verdict_versions(level.version);
    let validation = ValidationRepo::upsert(
        &mut tx,
        &UpsertValidation {
            level_id,
            level_version: verdict_version,
            validator_id: actor.id,
            result: verdict.result,
        },
    )
    .await?;

    let published = LevelRepo::apply_validation(
        &mut tx,
        level_id,
        level.version,
        &ApplyValidation {
            validation_id: validation.id,
            content: verdict.content,
            author_score: verdict.author_score,
            thumbnail: verdict.thumbnail,
            published_at: now,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Level changed during validation".into(),
        ))
    })?;
    debug_assert!(is_current_verdict(
        published.version,
        validation.level_version
    ));

    tx.commit().await?;

    tracing::info!(
        user_id = %actor.id,
        level_id = %level_id,
        validation_id = %validation.id,
        result = verdict.result.name(),
        version = next_version,
        "Level validated"
    );

    if let Some(previous) = level.validation_id.filter(|id| *id != validation.id) {
        if let Err(e) = ValidationRepo::delete(pool, previous).await {
            tracing::warn!(
                error = %e,
                level_id = %level_id,
                validation_id = %previous,
                "Failed to delete superseded validation"
            );
        }
    }

    Ok(validation)
}
