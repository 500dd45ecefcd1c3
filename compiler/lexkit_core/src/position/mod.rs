//! Source positions tracked while a [`Reader`](crate::Reader) consumes input.
//!
//! A position carries two different units on purpose:
//!
//! - `offset` counts *encoded bytes* (UTF-8), so it can index the raw input.
//! - `column` counts *code points* since the last line start.
//!
//! Mixing the two silently corrupts diagnostics on non-ASCII input.

use std::fmt;

use serde::Serialize;

/// Line, column and byte offset of a point in the input.
///
/// Positions are immutable values. [`Position::add`] returns the position
/// after one more code point and never mutates in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// 1-based line number (newlines seen plus one).
    line: usize,
    /// Code points consumed since the start of the current line.
    column: usize,
    /// Encoded bytes consumed since the start of the input.
    offset: usize,
}

impl Position {
    /// Position at the very start of an input: line 1, column 0, offset 0.
    pub const START: Position = Position::new(1, 0, 0);

    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the position immediately after consuming `ch`.
    ///
    /// The offset grows by the UTF-8 length of `ch`. A newline moves to the
    /// next line and resets the column to 0; anything else bumps the column.
    #[must_use]
    #[allow(
        clippy::should_implement_trait,
        reason = "position + char is not an arithmetic sum"
    )]
    pub const fn add(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 0,
                offset,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                offset,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.line, self.column, self.offset)
    }
}
