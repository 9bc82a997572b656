//! Product records produced by the format parsers and kept by the accumulators.

use std::fmt;

/// One product extracted from a single input line.
///
/// Produced by [`Format::parse_line`](crate::formats::Format::parse_line) and
/// moved into the reduction task that handles it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Product name, empty if the format carries none.
    pub name: String,
    /// Price as a 64-bit signed integer.
    pub price: i64,
    /// Rating as a 64-bit signed integer.
    pub rating: i64,
}

impl ParsedRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(name: impl Into<String>, price: i64, rating: i64) -> Self {
        ParsedRecord {
            name: name.into(),
            price,
            rating,
        }
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (price {}, rating {})",
            self.name, self.price, self.rating
        )
    }
}

/// Best record seen so far for one metric.
///
/// Starts at the zero value (empty name, price 0, rating 0), so a file with
/// no records that beat zero reports an empty name.
pub type BestRecord = ParsedRecord;
