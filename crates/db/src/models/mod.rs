//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / upsert DTOs consumed by the matching repository

pub mod level;
pub mod report;
pub mod session_token;
pub mod user;
pub mod validation;
pub mod vote;
