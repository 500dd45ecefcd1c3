//! Pre-computed line starts for repeated lookups on one document.
//!
//! [`Bytes`](crate::Bytes) rescans the document on every query, which is
//! fine for rendering a single error. When many positions are converted
//! against the same document, build a [`LineIndex`] once and get O(log L)
//! lookups with the same semantics.

use std::ops::Range;

use memchr::memchr_iter;

/// Byte offset of every line start in a document.
///
/// # Example
///
/// ```
/// use lexkit_diagnostic::LineIndex;
///
/// let index = LineIndex::build(b"line1\nline2\nline3");
///
/// assert_eq!(index.line_column(0), Some((1, 1)));  // 'l' in line1
/// assert_eq!(index.line_column(6), Some((2, 1)));  // 'l' in line2
/// assert_eq!(index.offset(3, 2), Some(13));        // 'i' in line3
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// `starts[0] == 0`; `starts[i]` is the byte after the `i`-th newline.
    starts: Vec<usize>,
    /// Document length in bytes.
    len: usize,
}

impl LineIndex {
    /// Scan `document` once for newlines.
    pub fn build(document: &[u8]) -> Self {
        let mut starts = vec![0];
        starts.extend(memchr_iter(b'\n', document).map(|i| i + 1));
        Self {
            starts,
            len: document.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte range of the 1-based line's content, excluding its `\n`.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let index = line.checked_sub(1)?;
        let start = *self.starts.get(index)?;
        let end = self
            .starts
            .get(index + 1)
            .map_or(self.len, |next| next - 1);
        Some(start..end)
    }

    /// 1-based line containing `offset`, if `offset` is inside the document.
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        if offset >= self.len {
            return None;
        }
        let index = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        Some(index + 1)
    }

    /// Same as [`Bytes::line_column`](crate::Bytes::line_column).
    pub fn line_column(&self, offset: usize) -> Option<(usize, usize)> {
        let line = self.line_of(offset)?;
        Some((line, offset - self.starts[line - 1] + 1))
    }

    /// Same as [`Bytes::offset`](crate::Bytes::offset).
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        let range = self.line_range(line)?;
        if column == 0 || column > range.len() {
            return None;
        }
        Some(range.start + column - 1)
    }
}
