//! Content repository operations: submit, edit, delete and listings.

use chrono::Duration;
use spooky_core::level::{validate_content, validate_name};
use spooky_core::moderation::stale_before;
use spooky_core::pagination::Page;
use spooky_core::policy::{authorize, Action, Ownership};
use spooky_core::roles::Role;
use spooky_core::types::{DbId, Timestamp};
use spooky_db::models::level::{
    CreateLevel, Level, ModerationFilter, ModerationLevel, UpdateLevelContent,
};
use spooky_db::repositories::LevelRepo;
use sqlx::PgPool;

use super::{ensure_level_exists, level_not_found, Actor, Listing};
use crate::error::AppResult;

/// Create a level at version 0, unvalidated and unlocked.
pub async fn submit(pool: &PgPool, actor: Actor, name: &str, content: &str) -> AppResult<Level> {
    authorize(actor.role, Action::SubmitLevel, Ownership::NotApplicable)?;
    let name = validate_name(name)?;
    validate_content(content)?;

    let level = LevelRepo::create(
        pool,
        &CreateLevel {
            user_id: actor.id,
            name,
            content: content.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = %actor.id, level_id = %level.id, "Level submitted");
    Ok(level)
}

/// Owner edit. Keeps `version` and the current verdict, and marks the level
/// as changed so it re-enters the review queue.
pub async fn update(
    pool: &PgPool,
    actor: Actor,
    level_id: DbId,
    name: &str,
    content: &str,
) -> AppResult<Level> {
    let name = validate_name(name)?;
    validate_content(content)?;

    let existing = ensure_level_exists(pool, level_id).await?;
    authorize(
        actor.role,
        Action::UpdateLevel,
        Ownership::of(actor.id, existing.user_id),
    )?;
    let reopens_review = !existing.moderation_snapshot().needs_review();

    let level = LevelRepo::update_content(
        pool,
        level_id,
        actor.id,
        &UpdateLevelContent {
            name,
            content: content.to_string(),
        },
    )
    .await?
    .ok_or_else(|| level_not_found(level_id))?;

    tracing::info!(
        user_id = %actor.id,
        level_id = %level_id,
        reopens_review,
        "Level updated"
    );
    Ok(level)
}

/// Delete a level as its owner or a moderator.
///
/// Returns `false` if the level was already gone.
pub async fn delete(pool: &PgPool, actor: Actor, level_id: DbId) -> AppResult<bool> {
    let Some(existing) = LevelRepo::find_by_id(pool, level_id).await? else {
        return Ok(false);
    };
    authorize(
        actor.role,
        Action::DeleteLevel,
        Ownership::of(actor.id, existing.user_id),
    )?;

    let deleted = LevelRepo::delete(pool, level_id).await?;
    tracing::info!(user_id = %actor.id, level_id = %level_id, deleted, "Level deleted");
    Ok(deleted)
}

/// Levels whose current verdict is `ok`.
pub async fn list_public(pool: &PgPool, page: Page) -> AppResult<Listing<Level>> {
    let items = LevelRepo::list_public(pool, page).await?;
    let total = LevelRepo::count_public(pool).await?;
    Ok(Listing { items, total })
}

/// The caller's own levels in any state.
pub async fn list_own(pool: &PgPool, actor: Actor, page: Page) -> AppResult<Listing<Level>> {
    authorize(actor.role, Action::ListOwnLevels, Ownership::NotApplicable)?;
    let items = LevelRepo::list_by_owner(pool, actor.id, page).await?;
    let total = LevelRepo::count_by_owner(pool, actor.id).await?;
    Ok(Listing { items, total })
}

/// The moderation queue.
///
/// Mods see every level. Agents do not see levels under another agent's
/// fresh lock, but keep seeing the ones they locked themselves.
pub async fn list_for_moderation(
    pool: &PgPool,
    actor: Actor,
    only_needs_review: bool,
    page: Page,
    now: Timestamp,
    lock_window: Duration,
) -> AppResult<Listing<ModerationLevel>> {
    authorize(
        actor.role,
        Action::ListLevelsForModeration,
        Ownership::NotApplicable,
    )?;

    let filter = ModerationFilter {
        only_needs_review,
        hide_locked_for: (actor.role == Role::Agent)
            .then(|| (actor.id, stale_before(now, lock_window))),
    };

    let items = LevelRepo::list_for_moderation(pool, &filter, page).await?;
    let total = LevelRepo::count_for_moderation(pool, &filter).await?;
    Ok(Listing { items, total })
}
