//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use spooky_core::error::CoreError;
use spooky_core::roles::Role;
use spooky_core::types::DbId;
use spooky_db::repositories::{SessionTokenRepo, UserRepo};

use crate::auth::jwt::{hash_token, validate_token};
use crate::error::AppError;
use crate::state::AppState;
use crate::workflow::Actor;

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// Resolution requires a valid signature, an unexpired session row matching
/// the token hash, and an existing user. The role is read from the user row
/// on every request, so role changes apply without re-login.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
    /// Hash of the presented token; identifies the session row.
    pub token_hash: String,
}

impl AuthUser {
    /// The caller as an explicit workflow argument.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

fn unauthenticated(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthenticated(msg.to_string()))
}

/// Caller identified by a correctly signed, unexpired bearer token alone.
///
/// No session row is required, so a token whose session was already
/// revoked still resolves. Used where repeating a request must stay safe.
#[derive(Debug, Clone)]
pub struct BearerToken {
    pub user_id: DbId,
    pub token_hash: String,
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthenticated("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthenticated("Invalid or expired token"))?;

        Ok(BearerToken {
            user_id: claims.sub,
            token_hash: hash_token(token),
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let session = SessionTokenRepo::find_live_by_hash(&state.pool, &bearer.token_hash)
            .await?
            .filter(|s| s.user_id == bearer.user_id)
            .ok_or_else(|| unauthenticated("Session expired or revoked"))?;

        // Last-seen is audit only; failing to record it never rejects.
        if let Err(e) = SessionTokenRepo::touch(&state.pool, session.id).await {
            tracing::warn!(error = %e, session_id = %session.id, "Failed to record session activity");
        }

        let user = UserRepo::find_by_id(&state.pool, bearer.user_id)
            .await?
            .ok_or_else(|| unauthenticated("User no longer exists"))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role()?,
            token_hash: bearer.token_hash,
        })
    }
}
