//! Level entity model and DTOs.

use serde::Serialize;
use spooky_core::moderation::ModerationSnapshot;
use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full level row from the `levels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub author_score: i32,
    /// Advanced only by a successful validation.
    pub version: i32,
    /// Non-null once a verdict has been recorded.
    pub validation_id: Option<DbId>,
    pub lock_holder_id: Option<DbId>,
    pub locked_at: Option<Timestamp>,
    /// Last owner edit not yet covered by a verdict.
    pub edited_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Level {
    /// The moderation columns as seen by the state machine.
    pub fn moderation_snapshot(&self) -> ModerationSnapshot {
        ModerationSnapshot {
            version: self.version,
            validation_id: self.validation_id,
            edited_at: self.edited_at,
            lock_holder_id: self.lock_holder_id,
            locked_at: self.locked_at,
        }
    }
}

/// A level as shown in moderation listings, with its report count.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationLevel {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub level: Level,
    pub report_count: i64,
}

/// DTO for submitting a new level.
#[derive(Debug, Clone)]
pub struct CreateLevel {
    pub user_id: DbId,
    pub name: String,
    pub content: String,
}

/// DTO for an owner edit.
#[derive(Debug, Clone)]
pub struct UpdateLevelContent {
    pub name: String,
    pub content: String,
}

/// Validator-approved values written when a verdict is applied.
#[derive(Debug, Clone)]
pub struct ApplyValidation {
    pub validation_id: DbId,
    pub content: String,
    pub author_score: i32,
    pub thumbnail: Option<String>,
    pub published_at: Timestamp,
}

/// Visibility filter for moderation listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModerationFilter {
    /// Only levels without a verdict or edited since their verdict.
    pub only_needs_review: bool,
    /// Hide levels under another holder's fresh lock: `(viewer, stale_before)`.
    pub hide_locked_for: Option<(DbId, Timestamp)>,
}
