//! Session manager: platform-bound accounts and bearer tokens.
//!
//! Only platform `none` can create accounts today; `steam` and `nintendo`
//! are refused with `Unauthenticated` until their verification exists.
//! Each login writes one `session_tokens` row. Refresh rewrites that row in
//! place and logout deletes it, so a user holds one row per device.

use spooky_core::error::CoreError;
use spooky_core::platform::{
    synthesize_platform_user_id, validate_platform_user_id, PlatformType, ANONYMOUS_DISPLAY_NAME,
};
use spooky_core::types::DbId;
use spooky_db::models::session_token::CreateSessionToken;
use spooky_db::models::user::{CreateUser, User};
use spooky_db::repositories::{SessionTokenRepo, UserRepo};
use sqlx::PgPool;

use crate::auth::jwt::{generate_token, hash_token, IssuedToken, JwtConfig};
use crate::error::{AppError, AppResult};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: IssuedToken,
}

/// Register a new local account with a synthesized platform user id.
pub async fn signup(pool: &PgPool, platform_type: PlatformType) -> AppResult<User> {
    platform_type.ensure_supported()?;
    let user = create_account(pool, platform_type).await?;
    tracing::info!(user_id = %user.id, platform = platform_type.name(), "User signed up");
    Ok(user)
}

/// Resolve or create the account for a platform identity and open a session.
///
/// For platform `none`, an empty or unknown id creates a fresh account with
/// a synthesized id; the caller learns it from the returned user.
pub async fn login(
    pool: &PgPool,
    jwt: &JwtConfig,
    platform_type: PlatformType,
    platform_user_id: Option<&str>,
) -> AppResult<LoginOutcome> {
    platform_type.ensure_supported()?;

    let existing = match platform_user_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => {
            validate_platform_user_id(id)?;
            UserRepo::find_by_platform_identity(pool, platform_type, id).await?
        }
        None => None,
    };

    let user = match existing {
        Some(user) => user,
        None => create_account(pool, platform_type).await?,
    };

    let token = open_session(pool, jwt, user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(LoginOutcome { user, token })
}

/// Replace the caller's current token with a new one of full lifespan.
///
/// The session row identified by `current_hash` is overwritten in place.
pub async fn refresh(
    pool: &PgPool,
    jwt: &JwtConfig,
    user_id: DbId,
    current_hash: &str,
) -> AppResult<IssuedToken> {
    let issued = generate_token(user_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    SessionTokenRepo::rotate(pool, current_hash, &hash_token(&issued.token), issued.expires_at)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Session expired or revoked".into(),
            ))
        })?;

    tracing::debug!(user_id = %user_id, "Session refreshed");
    Ok(issued)
}

/// Delete the session row for `(user_id, token_hash)`.
///
/// Returns `false` when it was already gone.
pub async fn logout(pool: &PgPool, user_id: DbId, token_hash: &str) -> AppResult<bool> {
    let deleted = SessionTokenRepo::delete_for_user(pool, user_id, token_hash).await?;
    tracing::info!(user_id = %user_id, deleted, "User logged out");
    Ok(deleted)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_account(pool: &PgPool, platform_type: PlatformType) -> AppResult<User> {
    let input = CreateUser {
        platform_type,
        platform_user_id: synthesize_platform_user_id(),
        display_name: ANONYMOUS_DISPLAY_NAME.to_string(),
    };
    UserRepo::create(pool, &input).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Platform identity is already registered".into(),
        ))
    })
}

async fn open_session(pool: &PgPool, jwt: &JwtConfig, user_id: DbId) -> AppResult<IssuedToken> {
    let issued = generate_token(user_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    SessionTokenRepo::create(
        pool,
        &CreateSessionToken {
            user_id,
            token_hash: hash_token(&issued.token),
            valid_until: issued.expires_at,
        },
    )
    .await?;

    Ok(issued)
}
