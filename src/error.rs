//! Error types for the strict content parsing entry points.
//!
//! The lenient functions ([`normalize`](crate::normalize) and everything
//! downstream of it) never fail; these errors only surface from
//! [`try_normalize`](crate::try_normalize) and [`parse_content`](crate::parse_content).

use thiserror::Error;

/// Result type alias for blogdoc operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors that can occur while parsing stored post content
#[derive(Error, Debug)]
pub enum ContentError {
    /// Stored content looked like JSON but could not be parsed
    #[error("Failed to parse content JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The value is neither a legacy block list, a rich tree, nor a string
    #[error("Unrecognized content shape: {0}")]
    UnrecognizedShape(String),
}
