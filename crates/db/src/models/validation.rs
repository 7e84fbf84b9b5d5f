//! Validation (moderation verdict) model and DTOs.

use serde::Serialize;
use spooky_core::moderation::ValidationResult;
use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `validations` table: one verdict per `(level, version)`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub id: DbId,
    pub level_id: DbId,
    pub level_version: i32,
    pub validator_id: DbId,
    pub result: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a verdict, keyed by `(level_id, level_version)`.
#[derive(Debug, Clone)]
pub struct UpsertValidation {
    pub level_id: DbId,
    pub level_version: i32,
    pub validator_id: DbId,
    pub result: ValidationResult,
}
