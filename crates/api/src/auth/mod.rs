//! Bearer token primitives.
//!
//! - [`jwt`] -- HS512 session token generation, validation and hashing.

pub mod jwt;
