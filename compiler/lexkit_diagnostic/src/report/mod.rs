//! Human-readable error locations with surrounding source lines.
//!
//! ```text
//! line 2, column 1: lexkit: syntax error: unexpected ')'
//!   1 | apiVersion: v1
//! > 2 | kind: Text
//!   3 | metadata:
//! ```

use std::fmt;

use lexkit_core::Error;

use crate::{Bytes, Context};

/// A message pinned to a line and column, with an optional source window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report<'a> {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub context: Option<Context<'a>>,
}

impl<'a> Report<'a> {
    /// Locate byte `offset` in `document` and attach `count` lines of context.
    ///
    /// An offset equal to the document length (end of input) points just
    /// past the last line. Returns `None` for offsets beyond that.
    pub fn at_offset(
        document: Bytes<'a>,
        offset: usize,
        message: impl Into<String>,
        count: usize,
    ) -> Option<Self> {
        let (line, column) = locate(document, offset)?;
        Some(Self {
            line,
            column,
            message: message.into(),
            context: document.context(line, count),
        })
    }

    /// Report a lex session's sticky error at the position it was raised.
    ///
    /// The reader must have started at the beginning of `document` for the
    /// error's byte offset to be meaningful.
    pub fn from_error(document: Bytes<'a>, error: &Error, count: usize) -> Option<Self> {
        Self::at_offset(document, error.position().offset(), error.to_string(), count)
    }
}

fn locate(document: Bytes<'_>, offset: usize) -> Option<(usize, usize)> {
    if let Some(found) = document.line_column(offset) {
        return Some(found);
    }
    if offset != document.len() {
        return None;
    }
    let line = document.line_count();
    let column = document.line(line).map_or(0, <[u8]>::len) + 1;
    Some((line, column))
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)?;
        let Some(context) = &self.context else {
            return Ok(());
        };
        let width = context
            .lines
            .last()
            .map_or(1, |last| last.number.to_string().len());
        for line in &context.lines {
            let marker = if line.number == context.target.number {
                '>'
            } else {
                ' '
            };
            write!(
                f,
                "\n{marker} {:>width$} | {}",
                line.number,
                String::from_utf8_lossy(line.text)
            )?;
        }
        Ok(())
    }
}

/// Render `message` at `offset` as `line N, column M: message` followed by
/// `count` lines of context on each side.
pub fn render(document: &[u8], offset: usize, message: &str, count: usize) -> Option<String> {
    Report::at_offset(Bytes::new(document), offset, message, count).map(|r| r.to_string())
}

/// Render a lex session's sticky error against the document it was reading.
pub fn render_error(document: &[u8], error: &Error, count: usize) -> Option<String> {
    Report::from_error(Bytes::new(document), error, count).map(|r| r.to_string())
}
