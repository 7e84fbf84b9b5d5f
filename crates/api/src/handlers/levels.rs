//! Handlers for levels, feedback and moderation.
//!
//! `GET /levels` is role-dispatched: moderators get the moderation queue
//! (with lock and report data), everyone else gets the public listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use spooky_core::error::CoreError;
use spooky_core::feedback::VoteType;
use spooky_core::moderation::ValidationResult;
use spooky_core::types::{DbId, Timestamp};
use spooky_db::models::level::Level;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::query::{flag_enabled, PaginationParams};
use crate::state::AppState;
use crate::workflow::moderation::Verdict;
use crate::workflow::{content, feedback, moderation, Listing};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /levels`.
#[derive(Debug, Deserialize)]
pub struct ListLevelsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// `1` restricts the moderation queue to levels needing review.
    pub only_sus: Option<String>,
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /levels` and `PUT /levels/{id}`.
#[derive(Debug, Deserialize)]
pub struct LevelInput {
    pub name: String,
    pub content: String,
}

/// Request body for `PUT /levels/{id}/vote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: String,
}

/// Request body for `PUT /levels/{id}/validate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub content: String,
    pub author_score: i32,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub result: String,
}

/// A level as shown to players: no lock or edit bookkeeping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLevel {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub author_score: i32,
    pub version: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Level> for PublicLevel {
    fn from(level: Level) -> Self {
        Self {
            id: level.id,
            user_id: level.user_id,
            name: level.name,
            content: level.content,
            thumbnail: level.thumbnail,
            author_score: level.author_score,
            version: level.version,
            published_at: level.published_at,
            created_at: level.created_at,
        }
    }
}

/// `{ levels, total }` listing envelope.
#[derive(Debug, Serialize)]
pub struct LevelPage<T: Serialize> {
    pub levels: Vec<T>,
    pub total: i64,
}

impl<T: Serialize> LevelPage<T> {
    fn from_listing<U>(listing: Listing<U>) -> Self
    where
        T: From<U>,
    {
        Self {
            levels: listing.items.into_iter().map(T::from).collect(),
            total: listing.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedLevel {
    pub id: DbId,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub vote_id: DbId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: DbId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCountResponse {
    pub level_id: DbId,
    pub report_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub validation_id: DbId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockResponse {
    pub level_id: DbId,
    pub locked_by: Option<DbId>,
    pub locked_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /levels
pub async fn list_levels(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(params): AppQuery<ListLevelsParams>,
) -> AppResult<Response> {
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .page();
    let only_sus = flag_enabled(params.only_sus.as_deref());

    if auth_user.role.is_moderator() {
        let listing = content::list_for_moderation(
            &state.pool,
            auth_user.actor(),
            only_sus,
            page,
            Utc::now(),
            state.config.jwt.lock_window(),
        )
        .await?;
        return Ok(Json(LevelPage {
            levels: listing.items,
            total: listing.total,
        })
        .into_response());
    }

    if only_sus {
        return Err(AppError::Core(CoreError::NotAuthorized(
            "Only moderators may list levels awaiting review".into(),
        )));
    }

    let listing = content::list_public(&state.pool, page).await?;
    Ok(Json(LevelPage::<PublicLevel>::from_listing(listing)).into_response())
}

/// GET /me/levels
pub async fn list_my_levels(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<LevelPage<Level>>> {
    let listing = content::list_own(&state.pool, auth_user.actor(), params.page()).await?;
    Ok(Json(LevelPage {
        levels: listing.items,
        total: listing.total,
    }))
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// POST /levels
pub async fn create_level(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<LevelInput>,
) -> AppResult<(StatusCode, Json<CreatedLevel>)> {
    let level = content::submit(&state.pool, auth_user.actor(), &input.name, &input.content).await?;
    Ok((StatusCode::CREATED, Json(CreatedLevel { id: level.id })))
}

/// PUT /levels/{id}
pub async fn update_level(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<LevelInput>,
) -> AppResult<Json<Level>> {
    let level = content::update(
        &state.pool,
        auth_user.actor(),
        id,
        &input.name,
        &input.content,
    )
    .await?;
    Ok(Json(level))
}

/// DELETE /levels/{id}
///
/// Repeating a delete succeeds with `deleted: false`.
pub async fn delete_level(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = content::delete(&state.pool, auth_user.actor(), id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// PUT /levels/{id}/vote
pub async fn vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<VoteRequest>,
) -> AppResult<Json<VoteResponse>> {
    let vote_type = VoteType::from_name(&input.vote_type)?;
    let vote = feedback::vote(&state.pool, auth_user.actor(), id, vote_type).await?;
    Ok(Json(VoteResponse { vote_id: vote.id }))
}

/// PUT /levels/{id}/reports
pub async fn report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ReportResponse>> {
    let report = feedback::report(&state.pool, auth_user.actor(), id).await?;
    Ok(Json(ReportResponse {
        report_id: report.id,
    }))
}

/// GET /levels/{id}/reports
pub async fn report_count(
    State(state): State<AppState>,
    RequireModerator(auth_user): RequireModerator,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ReportCountResponse>> {
    let report_count = feedback::report_count(&state.pool, auth_user.actor(), id).await?;
    Ok(Json(ReportCountResponse {
        level_id: id,
        report_count,
    }))
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// PUT /levels/{id}/lock
pub async fn acquire_lock(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<LockResponse>> {
    let level = moderation::acquire_lock(
        &state.pool,
        auth_user.actor(),
        id,
        Utc::now(),
        state.config.jwt.lock_window(),
    )
    .await?;
    Ok(Json(LockResponse {
        level_id: level.id,
        locked_by: level.lock_holder_id,
        locked_at: level.locked_at,
    }))
}

/// PUT /levels/{id}/validate
pub async fn validate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ValidateRequest>,
) -> AppResult<Json<ValidationResponse>> {
    let verdict = Verdict {
        content: input.content,
        author_score: input.author_score,
        thumbnail: input.thumbnail,
        result: ValidationResult::from_name(&input.result)?,
    };
    let validation = moderation::validate(
        &state.pool,
        auth_user.actor(),
        id,
        verdict,
        Utc::now(),
        state.config.jwt.lock_window(),
    )
    .await?;
    Ok(Json(ValidationResponse {
        validation_id: validation.id,
    }))
}
