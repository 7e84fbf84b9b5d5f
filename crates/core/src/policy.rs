//! Centralized authorization policy.
//!
//! Every permission check in the service goes through [`authorize`], a pure
//! function of the caller's role, the attempted action and the caller's
//! relationship to the target resource. Handlers never compare roles
//! themselves.

use crate::error::CoreError;
use crate::roles::Role;

/// An operation a caller attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitLevel,
    UpdateLevel,
    DeleteLevel,
    ListPublicLevels,
    ListOwnLevels,
    ListLevelsForModeration,
    AcquireValidationLock,
    ValidateLevel,
    Vote,
    Report,
    ViewReportCount,
}

impl Action {
    fn describe(self) -> &'static str {
        match self {
            Self::SubmitLevel => "submit levels",
            Self::UpdateLevel => "update this level",
            Self::DeleteLevel => "delete this level",
            Self::ListPublicLevels => "list public levels",
            Self::ListOwnLevels => "list own levels",
            Self::ListLevelsForModeration => "list levels for moderation",
            Self::AcquireValidationLock => "lock levels for validation",
            Self::ValidateLevel => "validate levels",
            Self::Vote => "vote on this level",
            Self::Report => "report this level",
            Self::ViewReportCount => "view report counts",
        }
    }
}

/// The caller's relationship to the resource the action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The caller owns the target resource.
    Owner,
    /// The target resource belongs to someone else.
    NotOwner,
    /// The action does not target a single owned resource.
    NotApplicable,
}

impl Ownership {
    /// Derive ownership from the caller id and the resource owner id.
    pub fn of<T: PartialEq>(caller: T, owner: T) -> Self {
        if caller == owner {
            Self::Owner
        } else {
            Self::NotOwner
        }
    }
}

/// Whether `role` may perform `action` given `ownership`.
pub fn is_allowed(role: Role, action: Action, ownership: Ownership) -> bool {
    match action {
        Action::SubmitLevel | Action::ListPublicLevels | Action::ListOwnLevels => true,
        Action::UpdateLevel => ownership == Ownership::Owner,
        Action::DeleteLevel => ownership == Ownership::Owner || role.is_moderator(),
        Action::ListLevelsForModeration
        | Action::AcquireValidationLock
        | Action::ValidateLevel
        | Action::ViewReportCount => role.is_moderator(),
        // Feedback on one's own content is never allowed, whatever the role.
        Action::Vote | Action::Report => ownership == Ownership::NotOwner,
    }
}

/// Like [`is_allowed`], but returns [`CoreError::NotAuthorized`] on deny.
pub fn authorize(role: Role, action: Action, ownership: Ownership) -> Result<(), CoreError> {
    if is_allowed(role, action, ownership) {
        Ok(())
    } else {
        Err(CoreError::NotAuthorized(format!(
            "Role '{role}' may not {}",
            action.describe()
        )))
    }
}
