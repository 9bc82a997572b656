//! Line-per-object JSON products.
//!
//! Lines look like `{"product": "Widget", "price": 42, "rating": 7}`. This is
//! not a JSON parser: the line is cut at `:`, `,`, spaces and `}` and the
//! values are read from fixed token positions.

use super::{parse_int, require_tokens};
use crate::error::ParseError;
use crate::record::ParsedRecord;

const NAME_TOKEN: usize = 1;
const PRICE_TOKEN: usize = 3;
const RATING_TOKEN: usize = 5;

/// Token separators for the JSON line format.
#[must_use]
pub fn is_separator(c: char) -> bool {
    matches!(c, ':' | ',' | ' ' | '}')
}

/// Extract name, price and rating from JSON line tokens.
///
/// The name keeps its content but loses the surrounding double quotes.
///
/// # Errors
///
/// Returns [`ParseError::ShortLine`] for fewer than six tokens and
/// [`ParseError::InvalidNumber`] if price or rating is not an integer.
pub fn parse_values(tokens: &[&str]) -> Result<ParsedRecord, ParseError> {
    require_tokens(tokens, RATING_TOKEN + 1)?;
    let price = parse_int("price", tokens[PRICE_TOKEN])?;
    let rating = parse_int("rating", tokens[RATING_TOKEN])?;
    let name = tokens[NAME_TOKEN].trim_matches('"');
    Ok(ParsedRecord::new(name, price, rating))
}
