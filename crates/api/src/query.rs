//! Shared query parameter types for API handlers.

use serde::Deserialize;
use spooky_core::pagination::Page;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp into a [`Page`].
    pub fn page(&self) -> Page {
        Page::from_params(self.limit, self.offset)
    }
}

/// Interpret a query flag such as `only_sus=1`.
///
/// `1`, `true` and `yes` (any case) are on; anything else, including an
/// absent parameter, is off.
pub fn flag_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}
