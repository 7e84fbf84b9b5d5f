//! Level sharing API server library.
//!
//! Exposes config, state, error handling, the workflow layer and the router
//! so integration tests and the binary entrypoint share one construction
//! path.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod workflow;
