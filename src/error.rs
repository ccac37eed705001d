//! Error types for the Lampas library.
//!
//! All errors are represented by the [`LampasError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use lampas::error::{LampasError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LampasError::analysis("invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Lampas operations.
///
/// This enum represents all possible errors that can occur in the Lampas
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum LampasError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, lexicon access, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors (chunk index, keyword scanner)
    #[error("Index error: {0}")]
    Index(String),

    /// Highlighting errors
    #[error("Highlight error: {0}")]
    Highlight(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LampasError.
pub type Result<T> = std::result::Result<T, LampasError>;

impl LampasError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LampasError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        LampasError::Index(msg.into())
    }

    /// Create a new highlight error.
    pub fn highlight<S: Into<String>>(msg: S) -> Self {
        LampasError::Highlight(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LampasError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LampasError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LampasError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = LampasError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");

        let error = LampasError::highlight("Test highlight error");
        assert_eq!(error.to_string(), "Highlight error: Test highlight error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lampas_error = LampasError::from(io_error);

        match lampas_error {
            LampasError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
