//! Role-based access control extractors.
//!
//! Wrap [`AuthUser`] and reject callers whose role does not pass the
//! central policy for the guarded action.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use spooky_core::policy::{authorize, Action, Ownership};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a moderation role (`mod` or `agent`). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn queue(RequireModerator(user): RequireModerator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(user.role, Action::ListLevelsForModeration, Ownership::NotApplicable)?;
        Ok(RequireModerator(user))
    }
}
