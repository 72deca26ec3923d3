//! Error types for cmsrender library.

use std::io;
use thiserror::Error;

/// Result type alias for cmsrender operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the edges of rendering.
///
/// Rendering and normalization themselves never fail; these errors come
/// from reading input and serializing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A page slug is not in `lower-case-with-hyphens` form.
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidSlug("Bad Slug".to_string());
        assert_eq!(err.to_string(), "Invalid slug: \"Bad Slug\"");

        let err = Error::Render("boom".to_string());
        assert_eq!(err.to_string(), "Rendering error: boom");

        let err = Error::Other("2 pages failed".to_string());
        assert_eq!(err.to_string(), "2 pages failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
