//! User roles.
//!
//! Role names must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_PLAYER: &str = "player";
pub const ROLE_MOD: &str = "mod";
pub const ROLE_AGENT: &str = "agent";

/// The closed set of roles a user can hold.
///
/// `Mod` and `Agent` are both moderation roles; only agents are bound by
/// the cooperative validation lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Mod,
    Agent,
}

impl Role {
    /// Parse from the database `role` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_PLAYER => Ok(Self::Player),
            ROLE_MOD => Ok(Self::Mod),
            ROLE_AGENT => Ok(Self::Agent),
            other => Err(CoreError::Internal(format!("Unknown role '{other}'"))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Player => ROLE_PLAYER,
            Self::Mod => ROLE_MOD,
            Self::Agent => ROLE_AGENT,
        }
    }

    /// Whether this role belongs to the moderation tier.
    pub fn is_moderator(self) -> bool {
        matches!(self, Self::Mod | Self::Agent)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
