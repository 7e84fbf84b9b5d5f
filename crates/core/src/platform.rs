//! Identity platforms an account can be bound to.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Display name given to locally generated accounts.
pub const ANONYMOUS_DISPLAY_NAME: &str = "anonym";

/// Maximum accepted length of an externally supplied platform user id.
pub const MAX_PLATFORM_USER_ID_LEN: usize = 128;

/// Platform an account is bound to.
///
/// `None` is a locally generated pseudo-account whose platform user id is
/// synthesized by the server. `Steam` and `Nintendo` require verification
/// of a platform token against the vendor before an account can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    None,
    Steam,
    Nintendo,
}

impl PlatformType {
    /// Parse from the database `platform_type` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "none" => Ok(Self::None),
            "steam" => Ok(Self::Steam),
            "nintendo" => Ok(Self::Nintendo),
            other => Err(CoreError::InvalidInput(format!(
                "Unknown platform type '{other}'"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Steam => "steam",
            Self::Nintendo => "nintendo",
        }
    }

    /// Whether logins on this platform must be verified with the vendor.
    pub fn requires_external_verification(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Reject platforms that cannot be used until a vendor verification
    /// integration exists.
    pub fn ensure_supported(self) -> Result<(), CoreError> {
        if self.requires_external_verification() {
            return Err(CoreError::Unauthenticated(format!(
                "Platform '{}' cannot be verified",
                self.name()
            )));
        }
        Ok(())
    }
}

/// Generate a fresh platform user id for a local (`none`) account.
pub fn synthesize_platform_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validate a client supplied platform user id.
pub fn validate_platform_user_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "platformUserId must not be empty".into(),
        ));
    }
    if id.len() > MAX_PLATFORM_USER_ID_LEN {
        return Err(CoreError::InvalidInput(format!(
            "platformUserId must be at most {MAX_PLATFORM_USER_ID_LEN} characters"
        )));
    }
    Ok(())
}
