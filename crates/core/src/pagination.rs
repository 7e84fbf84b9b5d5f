//! Offset/limit pagination helpers.

/// Page size used when the caller does not specify `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Largest page a caller can request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page from raw query parameters using the default bounds.
    pub fn from_params(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            offset: clamp_offset(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn page_from_params() {
        assert_eq!(
            Page::from_params(None, None),
            Page { limit: DEFAULT_PAGE_LIMIT, offset: 0 }
        );
        assert_eq!(
            Page::from_params(Some(500), Some(10)),
            Page { limit: MAX_PAGE_LIMIT, offset: 10 }
        );
    }
}
