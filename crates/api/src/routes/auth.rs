//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup         -> signup
/// POST /login          -> login
/// POST /refresh_token  -> refresh_token (requires auth)
/// POST /logout         -> logout (requires a signed token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh_token", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
}
