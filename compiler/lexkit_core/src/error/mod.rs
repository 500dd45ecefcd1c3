//! The sticky reader error.
//!
//! A [`Reader`](crate::Reader) records at most one [`Error`]. Once set, every
//! read short-circuits to end of input and the error is never cleared;
//! resuming means building a new reader.

use std::io;

use thiserror::Error;

use crate::Position;

/// Toolkit-level category of an [`Error`], for callers that only need to
/// tell "input broke" apart from "someone reported a syntax error".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input stream failed for a reason other than end-of-stream.
    Io,
    /// The input bytes were not valid UTF-8 and the reader was strict.
    InvalidUtf8,
    /// Raised explicitly through `errorf` or a parser's `error` hook.
    Reported,
}

/// Terminal error of a lex session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lexkit: {op} from reader at {position}: {source}")]
    Io {
        op: &'static str,
        position: Position,
        #[source]
        source: io::Error,
    },

    #[error("lexkit: invalid UTF-8 sequence {bytes:02x?} at {position}")]
    InvalidUtf8 { position: Position, bytes: Vec<u8> },

    #[error("lexkit: {message}")]
    Reported { position: Position, message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Error::Reported { .. } => ErrorKind::Reported,
        }
    }

    /// Reader position at the moment the error was recorded.
    pub fn position(&self) -> Position {
        match self {
            Error::Io { position, .. }
            | Error::InvalidUtf8 { position, .. }
            | Error::Reported { position, .. } => *position,
        }
    }
}
