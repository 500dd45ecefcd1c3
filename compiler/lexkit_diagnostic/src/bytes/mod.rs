//! Offset, line/column and context queries over a complete document.
//!
//! Lines are the document split on `\n`. A `\r` before the newline is line
//! content, so every separator is exactly one byte. Columns are 1-based and
//! counted in bytes from the start of the line.
//!
//! All queries are pure and return `None` for out-of-range input instead of
//! failing: a stale position after an edit is an expected case.

use memchr::{memchr_iter, memrchr};

/// A document buffer to run position queries against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bytes<'a>(&'a [u8]);

/// One line of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line content without the trailing `\n`.
    pub text: &'a [u8],
}

/// A target line and the window of lines around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context<'a> {
    pub target: ContextLine<'a>,
    /// Lines in ascending order, clipped to the document; includes `target`.
    pub lines: Vec<ContextLine<'a>>,
}

impl<'a> Bytes<'a> {
    pub fn new(document: &'a [u8]) -> Self {
        Self(document)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn lines(&self) -> impl Iterator<Item = &'a [u8]> {
        self.0.split(|&b| b == b'\n')
    }

    /// Number of lines; a trailing newline starts one more (empty) line.
    pub fn line_count(&self) -> usize {
        memchr_iter(b'\n', self.0).count() + 1
    }

    /// Content of the 1-based line `number`.
    pub fn line(&self, number: usize) -> Option<&'a [u8]> {
        self.lines().nth(number.checked_sub(1)?)
    }

    /// 1-based `(line, column)` of the byte at `offset`.
    ///
    /// `None` when `offset` is not inside the document.
    pub fn line_column(&self, offset: usize) -> Option<(usize, usize)> {
        if offset >= self.0.len() {
            return None;
        }
        let before = &self.0[..offset];
        let line = memchr_iter(b'\n', before).count() + 1;
        let line_start = memrchr(b'\n', before).map_or(0, |i| i + 1);
        Some((line, offset - line_start + 1))
    }

    /// Byte offset of 1-based `(line, column)`.
    ///
    /// `None` when either is 0, the line does not exist, or the column is
    /// past the end of the line's content.
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        if column == 0 {
            return None;
        }
        let index = line.checked_sub(1)?;
        let mut start = 0;
        for (i, text) in self.lines().enumerate() {
            if i == index {
                return (column <= text.len()).then_some(start + column - 1);
            }
            // One byte for the separator.
            start += text.len() + 1;
        }
        None
    }

    /// Line `line` plus up to `count` lines on each side.
    ///
    /// The window is clipped at the document boundaries and never padded.
    pub fn context(&self, line: usize, count: usize) -> Option<Context<'a>> {
        let index = line.checked_sub(1)?;
        let all: Vec<&'a [u8]> = self.lines().collect();
        let target_text = *all.get(index)?;

        let first = index.saturating_sub(count);
        let last = index.saturating_add(count).min(all.len() - 1);
        let lines = (first..=last)
            .map(|i| ContextLine {
                number: i + 1,
                text: all[i],
            })
            .collect();

        Some(Context {
            target: ContextLine {
                number: line,
                text: target_text,
            },
            lines,
        })
    }
}

impl<'a> From<&'a [u8]> for Bytes<'a> {
    fn from(document: &'a [u8]) -> Self {
        Self(document)
    }
}

impl<'a> From<&'a str> for Bytes<'a> {
    fn from(document: &'a str) -> Self {
        Self(document.as_bytes())
    }
}
