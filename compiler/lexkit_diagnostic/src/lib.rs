//! Diagnostics helpers for lexkit.
//!
//! Pure queries over a fully buffered document, used once a lex session has
//! failed to turn a byte offset into something a person can read:
//!
//! - [`Bytes`]: offset to line/column, line/column to offset, and a context
//!   window of lines around a target line.
//! - [`LineIndex`]: the same lookups backed by a pre-computed line table.
//! - [`Report`], [`render`], [`render_error`]: `line N, column M: message`
//!   followed by the surrounding source.
//!
//! ```
//! use lexkit_diagnostic::Bytes;
//!
//! let doc = Bytes::from("apiVersion: v1\nkind: Text");
//! assert_eq!(doc.line_column(15), Some((2, 1)));
//! assert_eq!(doc.offset(2, 1), Some(15));
//! assert_eq!(doc.context(1, 1).map(|c| c.lines.len()), Some(2));
//! ```

mod bytes;
mod line_index;
mod report;

pub use bytes::{Bytes, Context, ContextLine};
pub use line_index::LineIndex;
pub use report::{render, render_error, Report};
