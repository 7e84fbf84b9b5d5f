pub mod auth;
pub mod levels;
