//! Moderation state machine for levels.
//!
//! A level moves `Unvalidated -> Locked(agent, at) -> Validated`. The lock
//! is cooperative: it is a holder id plus a timestamp, and it is considered
//! abandoned once it is older than the lock window (the session token
//! lifespan). This is a coarse domain-level timeout, not a lease, and it
//! gives no cryptographic mutual exclusion. The database enforces the
//! acquisition itself with a single conditional update; the functions here
//! decide what that update must allow and classify refusals.
//!
//! Versions pair content with the verdict that reviewed it. Validating a
//! level at version `N` records the verdict at `N` and advances the level to
//! `N + 1`, so a published level always satisfies
//! `verdict.level_version + 1 == level.version`.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// Outcome recorded by a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationResult {
    Ok,
    ContentSuspect,
    NameSuspect,
    ContentTooComplex,
}

impl ValidationResult {
    /// Parse from the database `result` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "ok" => Ok(Self::Ok),
            "content-suspect" => Ok(Self::ContentSuspect),
            "name-suspect" => Ok(Self::NameSuspect),
            "content-too-complex" => Ok(Self::ContentTooComplex),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid validation result '{other}'"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ContentSuspect => "content-suspect",
            Self::NameSuspect => "name-suspect",
            Self::ContentTooComplex => "content-too-complex",
        }
    }

    /// Only an `ok` verdict makes a level publicly listable.
    pub fn is_publishable(self) -> bool {
        self == Self::Ok
    }
}

/// The moderation-relevant columns of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationSnapshot {
    pub version: i32,
    pub validation_id: Option<DbId>,
    pub edited_at: Option<Timestamp>,
    pub lock_holder_id: Option<DbId>,
    pub locked_at: Option<Timestamp>,
}

/// Derived moderation state of a level at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationState {
    /// No current verdict and no fresh lock.
    Unvalidated,
    /// A moderator holds a fresh lock.
    Locked { holder_id: DbId, locked_at: Timestamp },
    /// A verdict exists and the owner has not edited since.
    Validated { validation_id: DbId },
}

/// Whether a lock taken at `locked_at` still excludes other agents at `now`.
pub fn is_lock_fresh(locked_at: Timestamp, now: Timestamp, window: Duration) -> bool {
    now - locked_at < window
}

/// The instant at or before which a lock counts as abandoned.
pub fn stale_before(now: Timestamp, window: Duration) -> Timestamp {
    now - window
}

impl ModerationSnapshot {
    /// A verdict exists and nothing changed since it was issued.
    pub fn is_validated_unchanged(&self) -> bool {
        self.validation_id.is_some() && self.edited_at.is_none()
    }

    /// Holder of a lock that is still fresh at `now`, if any.
    pub fn fresh_lock_holder(&self, now: Timestamp, window: Duration) -> Option<DbId> {
        match (self.lock_holder_id, self.locked_at) {
            (Some(holder), Some(at)) if is_lock_fresh(at, now, window) => Some(holder),
            _ => None,
        }
    }

    /// Derive the state machine position at `now`.
    pub fn state(&self, now: Timestamp, window: Duration) -> ModerationState {
        if let (true, Some(validation_id)) = (self.is_validated_unchanged(), self.validation_id) {
            return ModerationState::Validated { validation_id };
        }
        match (self.fresh_lock_holder(now, window), self.locked_at) {
            (Some(holder_id), Some(locked_at)) => ModerationState::Locked { holder_id, locked_at },
            _ => ModerationState::Unvalidated,
        }
    }

    /// Whether the level belongs in an "only unvalidated" moderation queue.
    pub fn needs_review(&self) -> bool {
        !self.is_validated_unchanged()
    }
}

/// Decide whether `caller` may take the validation lock on a level.
///
/// Re-acquiring one's own lock is allowed and refreshes its timestamp.
pub fn check_acquire_lock(
    snapshot: &ModerationSnapshot,
    caller: DbId,
    now: Timestamp,
    window: Duration,
) -> Result<(), CoreError> {
    if snapshot.is_validated_unchanged() {
        return Err(CoreError::NotAuthorized(
            "Level is already validated".into(),
        ));
    }
    match snapshot.fresh_lock_holder(now, window) {
        Some(holder) if holder != caller => Err(CoreError::Conflict(
            "Level is locked by another agent".into(),
        )),
        _ => Ok(()),
    }
}

/// Decide whether `caller` with `role` may record a verdict on a level.
///
/// Mods bypass lock ownership. Agents are refused while another agent holds
/// a fresh lock; an absent or abandoned lock does not block them.
pub fn check_validate(
    role: Role,
    snapshot: &ModerationSnapshot,
    caller: DbId,
    now: Timestamp,
    window: Duration,
) -> Result<(), CoreError> {
    match role {
        Role::Player => Err(CoreError::NotAuthorized(
            "No moderation authorization".into(),
        )),
        Role::Mod => Ok(()),
        Role::Agent => match snapshot.fresh_lock_holder(now, window) {
            Some(holder) if holder != caller => Err(CoreError::Conflict(
                "Level is locked by another agent".into(),
            )),
            _ => Ok(()),
        },
    }
}

/// Version a new verdict is recorded at, and the level version after it.
pub fn verdict_versions(level_version: i32) -> (i32, i32) {
    (level_version, level_version + 1)
}

/// Whether a verdict recorded at `verdict_version` is the current one for a
/// level now at `level_version`. Older verdicts are stale.
pub fn is_current_verdict(level_version: i32, verdict_version: i32) -> bool {
    verdict_version + 1 == level_version
}
