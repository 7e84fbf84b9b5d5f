//! Domain core for the level sharing backend.
//!
//! Pure types and rules shared by the persistence and HTTP layers: the
//! error taxonomy, roles and platforms, the authorization policy, the
//! moderation state machine and input validation. Nothing in this crate
//! performs I/O.

pub mod error;
pub mod feedback;
pub mod level;
pub mod moderation;
pub mod pagination;
pub mod platform;
pub mod policy;
pub mod roles;
pub mod types;
