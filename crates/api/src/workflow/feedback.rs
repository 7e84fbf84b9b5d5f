//! Feedback ledger: one vote and one report per `(user, level)`.

use spooky_core::feedback::VoteType;
use spooky_core::policy::{authorize, Action, Ownership};
use spooky_core::types::DbId;
use spooky_db::models::report::{Report, UpsertReport};
use spooky_db::models::vote::{UpsertVote, Vote};
use spooky_db::repositories::{ReportRepo, VoteRepo};
use sqlx::PgPool;

use super::{ensure_level_exists, Actor};
use crate::error::AppResult;

/// Cast or replace the caller's vote on a level they do not own.
pub async fn vote(
    pool: &PgPool,
    actor: Actor,
    level_id: DbId,
    vote_type: VoteType,
) -> AppResult<Vote> {
    let level = ensure_level_exists(pool, level_id).await?;
    authorize(actor.role, Action::Vote, Ownership::of(actor.id, level.user_id))?;

    let vote = VoteRepo::upsert(
        pool,
        &UpsertVote {
            user_id: actor.id,
            level_id,
            vote_type,
        },
    )
    .await?;

    tracing::info!(
        user_id = %actor.id,
        level_id = %level_id,
        vote_type = vote_type.name(),
        "Vote recorded"
    );
    Ok(vote)
}

/// Raise (or repeat) the caller's report on a level they do not own.
///
/// Reports only accumulate; nothing is hidden automatically.
pub async fn report(pool: &PgPool, actor: Actor, level_id: DbId) -> AppResult<Report> {
    let level = ensure_level_exists(pool, level_id).await?;
    authorize(actor.role, Action::Report, Ownership::of(actor.id, level.user_id))?;

    let report = ReportRepo::upsert(
        pool,
        &UpsertReport {
            user_id: actor.id,
            level_id,
        },
    )
    .await?;

    tracing::info!(user_id = %actor.id, level_id = %level_id, "Report recorded");
    Ok(report)
}

/// Number of distinct reporters of a level. Moderators only.
pub async fn report_count(pool: &PgPool, actor: Actor, level_id: DbId) -> AppResult<i64> {
    authorize(actor.role, Action::ViewReportCount, Ownership::NotApplicable)?;
    ensure_level_exists(pool, level_id).await?;
    Ok(ReportRepo::count_for_level(pool, level_id).await?)
}
