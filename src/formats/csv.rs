//! Semicolon separated products: `name;price;rating`.
//!
//! Extra trailing fields are ignored. A header line such as
//! `product;price;rating` fails the integer conversion and is skipped like
//! any other malformed line.

use super::{parse_int, require_tokens};
use crate::error::ParseError;
use crate::record::ParsedRecord;

const NAME_TOKEN: usize = 0;
const PRICE_TOKEN: usize = 1;
const RATING_TOKEN: usize = 2;

/// Token separator for the CSV line format.
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == ';'
}

/// Extract name, price and rating from CSV line tokens.
///
/// # Errors
///
/// Returns [`ParseError::ShortLine`] for fewer than three tokens and
/// [`ParseError::InvalidNumber`] if price or rating is not an integer.
pub fn parse_values(tokens: &[&str]) -> Result<ParsedRecord, ParseError> {
    require_tokens(tokens, RATING_TOKEN + 1)?;
    let price = parse_int("price", tokens[PRICE_TOKEN])?;
    let rating = parse_int("rating", tokens[RATING_TOKEN])?;
    Ok(ParsedRecord::new(tokens[NAME_TOKEN], price, rating))
}
