//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::levels;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /levels  -> list_my_levels
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/levels", get(levels::list_my_levels))
}
