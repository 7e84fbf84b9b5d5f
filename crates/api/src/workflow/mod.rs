//! Workflow layer: the operations behind each endpoint.
//!
//! Every function takes the caller as an explicit [`Actor`] plus the pool
//! (and, where time matters, `now` and the lock window), so the same rules
//! run identically from handlers and from tests that pin the clock.
//!
//! - [`session`] -- signup, login, refresh, logout.
//! - [`content`] -- submit, update, delete and the three listings.
//! - [`feedback`] -- votes, reports and the report-count hook.
//! - [`moderation`] -- lock acquisition and validation.

pub mod content;
pub mod feedback;
pub mod moderation;
pub mod session;

use spooky_core::error::CoreError;
use spooky_core::roles::Role;
use spooky_core::types::DbId;
use spooky_db::models::level::Level;
use spooky_db::repositories::LevelRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// The authenticated caller of a workflow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

/// A page of results plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Verify that a level exists, returning the full row.
pub(crate) async fn ensure_level_exists(pool: &PgPool, id: DbId) -> AppResult<Level> {
    LevelRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| level_not_found(id))
}

pub(crate) fn level_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Level", id })
}
