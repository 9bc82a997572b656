//! Common test helpers shared across the test suite.

use std::io::Write;
use tempfile::NamedTempFile;

/// Writes `contents` to a temporary file whose name ends in `.{extension}`.
///
/// The file is removed when the returned handle is dropped.
pub fn write_input(extension: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("products-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes())
        .expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Formats one product as a JSON line.
#[allow(dead_code)]
pub fn json_line(name: &str, price: i64, rating: i64) -> String {
    format!("{{\"product\": \"{name}\", \"price\": {price}, \"rating\": {rating}}}")
}

/// Formats one product as a CSV line.
#[allow(dead_code)]
pub fn csv_line(name: &str, price: i64, rating: i64) -> String {
    format!("{name};{price};{rating}")
}
