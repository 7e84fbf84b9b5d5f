//! Vote types for the feedback ledger.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A player's up/down judgment on a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

impl VoteType {
    /// Parse from the database `vote_type` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid vote type '{other}'. Must be one of: like, dislike"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}
