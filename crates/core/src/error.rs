use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// `NotFound` is also returned when an entity exists but is filtered out by
/// a visibility rule, so callers cannot discover existence.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
