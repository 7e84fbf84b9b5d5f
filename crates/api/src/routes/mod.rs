pub mod auth;
pub mod health;
pub mod levels;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                    create local account (public)
/// /auth/login                     open a session (public)
/// /auth/refresh_token             rotate the presented token
/// /auth/logout                    revoke the presented token
///
/// /levels                         list (role-dispatched), submit
/// /levels/{id}                    update (owner), delete (owner or moderator)
/// /levels/{id}/vote               vote (non-owner)
/// /levels/{id}/reports            report (non-owner), report count (moderator)
/// /levels/{id}/lock               acquire validation lock (moderator)
/// /levels/{id}/validate           record verdict (moderator)
///
/// /me/levels                      caller's own levels
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/levels", levels::router())
        .nest("/me", me::router())
}
