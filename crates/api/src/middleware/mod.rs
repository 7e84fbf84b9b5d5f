//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves a bearer token to a live session and user.
//! - [`rbac::RequireModerator`] -- Requires the `mod` or `agent` role.

pub mod auth;
pub mod rbac;
