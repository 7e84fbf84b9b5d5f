//! Route definitions for the `/levels` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::levels;
use crate::state::AppState;

/// Routes mounted at `/levels`. All require auth.
///
/// ```text
/// GET    /                 -> list_levels
/// POST   /                 -> create_level
/// PUT    /{id}             -> update_level
/// DELETE /{id}             -> delete_level
/// PUT    /{id}/vote        -> vote
/// PUT    /{id}/reports     -> report
/// GET    /{id}/reports     -> report_count
/// PUT    /{id}/lock        -> acquire_lock
/// PUT    /{id}/validate    -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(levels::list_levels).post(levels::create_level))
        .route(
            "/{id}",
            put(levels::update_level).delete(levels::delete_level),
        )
        .route("/{id}/vote", put(levels::vote))
        .route(
            "/{id}/reports",
            put(levels::report).get(levels::report_count),
        )
        .route("/{id}/lock", put(levels::acquire_lock))
        .route("/{id}/validate", put(levels::validate))
}
