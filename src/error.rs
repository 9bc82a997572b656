//! Error types for prodpeak operations.
//!
//! This module provides two error types:
//!
//! - [`Error`] for failures that abort a run (unsupported input, bad
//!   configuration, I/O), together with the [`Result`] convenience type.
//! - [`ParseError`] for a single line that could not be turned into a
//!   [`ParsedRecord`](crate::record::ParsedRecord). These never leave the
//!   pipeline: the offending line is dropped and the run continues.

use thiserror::Error;

/// Error type for run-level failures.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file name carries an extension no format is registered for.
    #[error("Unsupported file extension: {0:?}")]
    UnsupportedFormat(String),

    /// The admission gate capacity is zero or above
    /// [`MAX_CAPACITY`](crate::admission::MAX_CAPACITY).
    #[error(
        "Invalid limit: {0} (must be between 1 and {})",
        crate::admission::MAX_CAPACITY
    )]
    InvalidLimit(usize),

    /// The worker pool for reduction tasks could not be started.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single line was rejected by a record parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line split into fewer tokens than the format needs.
    #[error("short line: expected at least {expected} tokens, found {found}")]
    ShortLine {
        /// Minimum number of tokens the format requires.
        expected: usize,
        /// Number of tokens actually present.
        found: usize,
    },

    /// A numeric field did not hold a 64-bit signed integer.
    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        /// Name of the field being converted (`price` or `rating`).
        field: &'static str,
        /// The raw token.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("xml".to_string());
        assert_eq!(format!("{err}"), "Unsupported file extension: \"xml\"");

        let err = Error::InvalidLimit(0);
        assert_eq!(
            format!("{err}"),
            "Invalid limit: 0 (must be between 1 and 1048576)"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::ShortLine {
            expected: 3,
            found: 1,
        };
        assert_eq!(
            format!("{err}"),
            "short line: expected at least 3 tokens, found 1"
        );

        let err = ParseError::InvalidNumber {
            field: "price",
            value: "a".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid price: \"a\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(format!("{err}"), "IO error: gone");
    }
}
