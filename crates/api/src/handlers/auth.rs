//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use spooky_core::platform::PlatformType;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, BearerToken};
use crate::state::AppState;
use crate::workflow::session;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformIdentityRequest {
    pub platform_type: String,
    #[serde(default)]
    pub platform_user_id: Option<String>,
}

/// Response for `POST /auth/signup`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub platform_user_id: String,
}

/// Response for `POST /auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Echoed back so clients learn a synthesized id.
    pub platform_user_id: String,
}

/// Response for `POST /auth/refresh_token`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlatformIdentityRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let platform_type = PlatformType::from_name(&input.platform_type)?;
    let user = session::signup(&state.pool, platform_type).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            platform_user_id: user.platform_user_id,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlatformIdentityRequest>,
) -> AppResult<Json<LoginResponse>> {
    let platform_type = PlatformType::from_name(&input.platform_type)?;
    let outcome = session::login(
        &state.pool,
        &state.config.jwt,
        platform_type,
        input.platform_user_id.as_deref(),
    )
    .await?;

    Ok(Json(LoginResponse {
        token: outcome.token.token,
        platform_user_id: outcome.user.platform_user_id,
    }))
}

/// POST /auth/refresh_token
///
/// Exchange the presented live token for a new one; the old one stops working.
pub async fn refresh_token(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<TokenResponse>> {
    let issued = session::refresh(
        &state.pool,
        &state.config.jwt,
        auth_user.user_id,
        &auth_user.token_hash,
    )
    .await?;
    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /auth/logout
///
/// Revokes only the presented token. Returns 204 No Content, also when the
/// session is already gone, so a retried logout succeeds.
pub async fn logout(State(state): State<AppState>, bearer: BearerToken) -> AppResult<StatusCode> {
    session::logout(&state.pool, bearer.user_id, &bearer.token_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}
