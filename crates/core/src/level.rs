//! Level input validation.
//!
//! Content and thumbnails are opaque to the server; only their size is
//! bounded here.

use crate::error::CoreError;

/// Maximum level name length in characters (after trimming).
pub const MAX_NAME_CHARS: usize = 64;

/// Maximum content blob size in bytes (1 MiB).
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Maximum encoded thumbnail size in bytes (256 KiB).
pub const MAX_THUMBNAIL_BYTES: usize = 256 * 1024;

/// Inclusive bounds of the author score assigned during validation.
pub const MIN_AUTHOR_SCORE: i32 = 0;
pub const MAX_AUTHOR_SCORE: i32 = 100;

/// Validate and normalize a level name. Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput("Level name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(CoreError::InvalidInput(format!(
            "Level name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a level content blob.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::InvalidInput("Level content must not be empty".into()));
    }
    if content.len() > MAX_CONTENT_BYTES {
        return Err(CoreError::InvalidInput(format!(
            "Level content must be at most {MAX_CONTENT_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Validate the author score assigned by a validator.
pub fn validate_author_score(score: i32) -> Result<(), CoreError> {
    if !(MIN_AUTHOR_SCORE..=MAX_AUTHOR_SCORE).contains(&score) {
        return Err(CoreError::InvalidInput(format!(
            "authorScore must be between {MIN_AUTHOR_SCORE} and {MAX_AUTHOR_SCORE}"
        )));
    }
    Ok(())
}

/// Validate an optional encoded thumbnail.
pub fn validate_thumbnail(thumbnail: Option<&str>) -> Result<(), CoreError> {
    match thumbnail {
        Some(t) if t.len() > MAX_THUMBNAIL_BYTES => Err(CoreError::InvalidInput(format!(
            "thumbnail must be at most {MAX_THUMBNAIL_BYTES} bytes"
        ))),
        _ => Ok(()),
    }
}
