//! Line formats understood by prodpeak.
//!
//! Each format is a pair of a split predicate, which turns a raw line into
//! tokens, and a field extractor, which picks the name, price and rating out
//! of those tokens. The format is chosen once per run from the input file's
//! extension.
//!
//! # Supported Formats
//!
//! | Extension | Variant | Separators | name / price / rating tokens |
//! |-----------|---------|------------|------------------------------|
//! | `json` | [`Format::Json`] | `:` `,` space `}` | 1 / 3 / 5 |
//! | `csv` | [`Format::Csv`] | `;` | 0 / 1 / 2 |
//!
//! # Example
//!
//! ```
//! use prodpeak::formats::Format;
//! use std::path::Path;
//!
//! let format = Format::from_path(Path::new("products.csv"))?;
//! let record = format.parse_line("Gadget;15;9")?;
//! assert_eq!(record.name, "Gadget");
//! assert_eq!(record.price, 15);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;
pub mod json;

use std::fmt;
use std::path::Path;

use crate::error::{Error, ParseError, Result};
use crate::record::ParsedRecord;

/// Record format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One flat JSON object per line.
    Json,
    /// Semicolon separated `name;price;rating`.
    Csv,
}

impl Format {
    /// Pick the format from the text after the last `.` of the file name.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the file name has no `.` or
    /// the text after it is not `json` or `csv`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let extension = file_name
            .rsplit_once('.')
            .map_or("", |(_, extension)| extension);
        Self::from_extension(extension)
    }

    /// Pick the format from a bare extension such as `"csv"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for anything but `json` and `csv`.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Whether `c` separates tokens in this format.
    #[must_use]
    pub fn is_separator(self, c: char) -> bool {
        match self {
            Format::Json => json::is_separator(c),
            Format::Csv => csv::is_separator(c),
        }
    }

    /// Split a line into non-empty tokens.
    #[must_use]
    pub fn tokenize(self, line: &str) -> Vec<&str> {
        line.split(|c: char| self.is_separator(c))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Extract a record from already split tokens.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if there are too few tokens or the price or
    /// rating token is not an integer.
    pub fn parse_values(self, tokens: &[&str]) -> std::result::Result<ParsedRecord, ParseError> {
        match self {
            Format::Json => json::parse_values(tokens),
            Format::Csv => csv::parse_values(tokens),
        }
    }

    /// Tokenize and extract in one step.
    ///
    /// # Errors
    ///
    /// See [`parse_values`](Self::parse_values).
    pub fn parse_line(self, line: &str) -> std::result::Result<ParsedRecord, ParseError> {
        self.parse_values(&self.tokenize(line))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Csv => f.write_str("csv"),
        }
    }
}

/// Check there are enough tokens to index up to `expected - 1`.
fn require_tokens(tokens: &[&str], expected: usize) -> std::result::Result<(), ParseError> {
    if tokens.len() < expected {
        return Err(ParseError::ShortLine {
            expected,
            found: tokens.len(),
        });
    }
    Ok(())
}

/// Convert a numeric token, naming the field in the error.
fn parse_int(field: &'static str, token: &str) -> std::result::Result<i64, ParseError> {
    token.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}
