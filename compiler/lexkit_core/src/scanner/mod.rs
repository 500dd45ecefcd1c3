//! Binds a [`Reader`] to a caller-supplied scan function.

use crate::{Reader, TokenTag, EOF};

/// A reader plus the strategy that classifies one lexeme per call.
pub trait Scanner {
    type Reader: Reader;

    fn reader(&self) -> &Self::Reader;

    fn reader_mut(&mut self) -> &mut Self::Reader;

    /// Run the scan function once and return its tag verbatim.
    ///
    /// Returns [`EOF`] without scanning once the reader's sticky error is set.
    fn scan(&mut self) -> TokenTag;

    /// Error hook for an external parser's generated error callback.
    ///
    /// Latches a reported error on the reader so the lex loop halts.
    fn error(&mut self, message: &str);
}

/// [`Scanner`] driven by a closure or `fn(&mut R) -> TokenTag`.
///
/// The scan function consumes exactly one lexical unit per call, leaving
/// the reader just after it, and returns [`EOF`] when there is nothing left.
pub struct FnScanner<R, F> {
    reader: R,
    scan_fn: F,
}

impl<R, F> FnScanner<R, F>
where
    R: Reader,
    F: FnMut(&mut R) -> TokenTag,
{
    pub fn new(reader: R, scan_fn: F) -> Self {
        Self { reader, scan_fn }
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}

impl<R, F> Scanner for FnScanner<R, F>
where
    R: Reader,
    F: FnMut(&mut R) -> TokenTag,
{
    type Reader = R;

    fn reader(&self) -> &R {
        &self.reader
    }

    fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    fn scan(&mut self) -> TokenTag {
        if self.reader.err().is_some() {
            return EOF;
        }
        (self.scan_fn)(&mut self.reader)
    }

    fn error(&mut self, message: &str) {
        self.reader.errorf(message, &[]);
    }
}
