//! Request extractors whose rejections render as [`AppError`] bodies.
//!
//! Axum's stock `Json`, `Path` and `Query` reject with plain-text responses
//! (422 for a body that does not match the target type). These wrappers run
//! the same extraction and map every rejection to `400 INVALID_INPUT`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
