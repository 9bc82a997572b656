//! Reading raw text lines from a buffered source.
//!
//! This module provides [`LineSource`], which yields one line at a time from
//! any [`std::io::BufRead`] until end of stream.
//!
//! # Examples
//!
//! ```
//! use prodpeak::line_source::LineSource;
//! use std::io::Cursor;
//!
//! let mut source = LineSource::new(Cursor::new("a;1;2\r\nb;3;4"));
//! assert_eq!(source.read_line()?.as_deref(), Some("a;1;2"));
//! assert_eq!(source.read_line()?.as_deref(), Some("b;3;4"));
//! assert_eq!(source.read_line()?, None);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Result;
use std::io::BufRead;

/// Sequential line reader.
///
/// Strips `\n` and `\r\n` terminators, yields a trailing line that has no
/// terminator, and replaces invalid UTF-8 instead of failing on it.
#[derive(Debug)]
pub struct LineSource<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    lines_read: usize,
}

impl<R: BufRead> LineSource<R> {
    /// Create a new line source over `reader`.
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            buffer: Vec::with_capacity(256),
            lines_read: 0,
        }
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the underlying reader fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let n = self.reader.read_until(b'\n', &mut self.buffer)?;
        if n == 0 {
            return Ok(None);
        }

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        self.lines_read += 1;
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }

    /// Number of lines yielded so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
