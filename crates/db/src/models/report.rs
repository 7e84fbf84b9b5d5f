//! Report model and DTOs.

use serde::Serialize;
use spooky_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reports` table, unique per `(user_id, level_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: DbId,
    pub user_id: DbId,
    pub level_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for raising a report.
#[derive(Debug, Clone)]
pub struct UpsertReport {
    pub user_id: DbId,
    pub level_id: DbId,
}
