//! Error types for docnorm.

use std::io;
use thiserror::Error;

/// Result type alias for docnorm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during normalization.
#[derive(Error, Debug)]
pub enum Error {
    /// A fragment could not be classified (e.g. a paragraph without text).
    #[error("Classification error: {0}")]
    Classification(String),

    /// A table candidate has no headers or no data rows.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input path is not a supported source kind.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Classification("paragraph has no text".into());
        assert_eq!(err.to_string(), "Classification error: paragraph has no text");

        let err = Error::UnsupportedSource("notes.txt".into());
        assert_eq!(err.to_string(), "Unsupported source: notes.txt");
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
