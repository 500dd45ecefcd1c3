//! Buffered, one-code-point-lookahead reader over raw input bytes.
//!
//! Scan functions pull code points through the [`Reader`] capability set:
//!
//! - [`peek`](Reader::peek) looks at the next code point without moving.
//! - [`next`](Reader::next) consumes it and appends it to the pending token
//!   buffer.
//! - [`discard`](Reader::discard) consumes it without buffering.
//!
//! `None` is the end-of-input sentinel. It is returned on physical end of
//! stream and, forever after, once the sticky error slot is set.
//!
//! # Decoding
//!
//! Input is decoded as UTF-8 one code point at a time straight from a
//! [`BufReader`]. Each maximal invalid subpart of a malformed or truncated
//! sequence decodes to U+FFFD, and the position advances by the encoded
//! length of U+FFFD like any other code point. Follow-up bytes are checked
//! before they are consumed, so a bad lead byte never swallows the valid
//! input after it.
//!
//! [`StreamReader::with_strict_utf8`] turns malformed input into a sticky
//! [`Error::InvalidUtf8`] instead.

use std::io::{self, BufRead, BufReader};
use std::ops::RangeInclusive;

use crate::{DebugHook, Error, Field, FieldValue, NoopHook, Position};

/// Capability set handed to scan functions.
pub trait Reader {
    /// Clear the pending token buffer. Position and error are untouched.
    fn reset_buffer(&mut self);

    /// Code points consumed by [`next`](Reader::next) since the last reset.
    fn buffer(&self) -> &str;

    /// Consume the next code point, advance the position, and buffer it.
    fn next(&mut self) -> Option<char>;

    /// Return the next code point without consuming it.
    fn peek(&mut self) -> Option<char>;

    /// Consume the next code point without buffering it.
    fn discard(&mut self) -> Option<char>;

    /// The sticky error, if one was recorded.
    fn err(&self) -> Option<&Error>;

    /// Position after the last consumed code point.
    fn pos(&self) -> Position;

    /// Emit a debug line through the injected hook.
    fn debugf(&self, message: &str, fields: &[Field<'_>]);

    /// Record a [`Error::Reported`] at the current position and log it.
    fn errorf(&mut self, message: &str, fields: &[Field<'_>]);

    /// Call [`discard`](Reader::discard) while `pred` holds on the peeked
    /// code point.
    fn discard_while<P>(&mut self, mut pred: P)
    where
        P: FnMut(char) -> bool,
        Self: Sized,
    {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.discard();
        }
    }

    /// Call [`next`](Reader::next) while `pred` holds on the peeked code
    /// point.
    fn next_while<P>(&mut self, mut pred: P)
    where
        P: FnMut(char) -> bool,
        Self: Sized,
    {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.next();
        }
    }
}

/// Returns the length of the UTF-8 sequence led by `byte` and the range
/// its second byte must fall in, or `None` for a continuation byte or a
/// lead byte no valid sequence uses.
///
/// The narrowed second-byte ranges exclude overlong forms, surrogates and
/// code points above U+10FFFF. Later bytes are always `0x80..=0xBF`.
#[inline]
fn utf8_sequence(byte: u8) -> Option<(usize, RangeInclusive<u8>)> {
    match byte {
        0x00..=0x7F => Some((1, 0x00..=0x00)),
        0xC2..=0xDF => Some((2, CONTINUATION)),
        0xE0 => Some((3, 0xA0..=0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((3, CONTINUATION)),
        0xED => Some((3, 0x80..=0x9F)),
        0xF0 => Some((4, 0x90..=0xBF)),
        0xF1..=0xF3 => Some((4, CONTINUATION)),
        0xF4 => Some((4, 0x80..=0x8F)),
        _ => None,
    }
}

const CONTINUATION: RangeInclusive<u8> = 0x80..=0xBF;

/// The concrete [`Reader`] over any [`io::Read`].
pub struct StreamReader<R> {
    input: BufReader<R>,
    pos: Position,
    buf: String,
    /// Code point decoded by `peek` and not consumed yet.
    peeked: Option<char>,
    err: Option<Error>,
    /// Malformed input is an error rather than U+FFFD.
    strict_utf8: bool,
    hook: Box<dyn DebugHook>,
}

impl<R: io::Read> StreamReader<R> {
    /// Reader starting at [`Position::START`] with the no-op hook.
    pub fn new(input: R) -> Self {
        Self {
            input: BufReader::new(input),
            pos: Position::START,
            buf: String::new(),
            peeked: None,
            err: None,
            strict_utf8: false,
            hook: Box::new(NoopHook),
        }
    }

    /// Start counting from `pos` instead of the beginning of a document,
    /// e.g. when lexing a fragment embedded in a larger file.
    #[must_use]
    pub fn with_position(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }

    /// Stop with a sticky [`Error::InvalidUtf8`] at the first malformed
    /// sequence instead of decoding it to U+FFFD.
    #[must_use]
    pub fn with_strict_utf8(mut self) -> Self {
        self.strict_utf8 = true;
        self
    }

    /// Route debug output to `hook`.
    #[must_use]
    pub fn with_hook(mut self, hook: impl DebugHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    fn log_attrs(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("line", self.pos.line()),
            Field::new("column", self.pos.column()),
            Field::new("offset", self.pos.offset()),
            Field::new("buf", self.buf.as_str()),
        ]
    }

    /// Latch `error` unless an earlier one is already set, then log.
    fn record(&mut self, error: Error, message: &str, fields: &[Field<'_>]) {
        if self.err.is_none() {
            self.err = Some(error);
        }
        if !self.hook.enabled() {
            return;
        }
        let mut attrs = self.log_attrs();
        attrs.extend_from_slice(fields);
        if let Some(err) = &self.err {
            attrs.push(Field::new("err", FieldValue::Display(err)));
        }
        self.hook.debug(&format!("lexkit: {message}"), &attrs);
    }

    /// Decode one code point, preferring a pending peek.
    fn read_char(&mut self, op: &'static str) -> Option<char> {
        if self.err.is_some() {
            return None;
        }
        if let Some(ch) = self.peeked.take() {
            return Some(ch);
        }
        match self.decode(op) {
            Ok(ch) => ch,
            Err(error) => {
                let message = format!("{op} from reader");
                self.record(error, &message, &[]);
                None
            }
        }
    }

    fn decode(&mut self, op: &'static str) -> Result<Option<char>, Error> {
        let Some(lead) = self.read_byte(op)? else {
            return Ok(None);
        };
        let Some((width, mut expected)) = utf8_sequence(lead) else {
            return self.malformed(&[lead]);
        };

        let mut bytes = [lead, 0, 0, 0];
        for i in 1..width {
            // Leave a byte that cannot continue the sequence for the next read.
            match self.peek_byte(op)? {
                Some(b) if expected.contains(&b) => {
                    self.input.consume(1);
                    bytes[i] = b;
                    expected = CONTINUATION;
                }
                _ => return self.malformed(&bytes[..i]),
            }
        }
        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => self.malformed(&bytes[..width]),
        }
    }

    /// One maximal invalid subpart: U+FFFD, or an error in strict mode.
    fn malformed(&self, bytes: &[u8]) -> Result<Option<char>, Error> {
        if self.strict_utf8 {
            return Err(self.invalid(bytes));
        }
        Ok(Some(char::REPLACEMENT_CHARACTER))
    }

    fn peek_byte(&mut self, op: &'static str) -> Result<Option<u8>, Error> {
        loop {
            match self.input.fill_buf() {
                Ok(available) => return Ok(available.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Io {
                        op,
                        position: self.pos,
                        source,
                    })
                }
            }
        }
    }

    fn read_byte(&mut self, op: &'static str) -> Result<Option<u8>, Error> {
        let byte = self.peek_byte(op)?;
        if byte.is_some() {
            self.input.consume(1);
        }
        Ok(byte)
    }

    fn invalid(&self, bytes: &[u8]) -> Error {
        Error::InvalidUtf8 {
            position: self.pos,
            bytes: bytes.to_vec(),
        }
    }
}

impl<'a> StreamReader<&'a [u8]> {
    /// Reader over an in-memory byte slice.
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Self::new(input)
    }
}

impl<R: io::Read> Reader for StreamReader<R> {
    fn reset_buffer(&mut self) {
        self.buf.clear();
    }

    fn buffer(&self) -> &str {
        &self.buf
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.read_char("Next");
        if let Some(ch) = ch {
            self.pos = self.pos.add(ch);
            self.buf.push(ch);
        }
        self.debugf("Next", &[Field::new("char", ch)]);
        ch
    }

    fn peek(&mut self) -> Option<char> {
        let ch = self.read_char("Peek");
        // Hand the code point back; the next read takes it without decoding.
        self.peeked = ch;
        self.debugf("Peek", &[Field::new("char", ch)]);
        ch
    }

    fn discard(&mut self) -> Option<char> {
        let ch = self.read_char("Discard");
        if let Some(ch) = ch {
            self.pos = self.pos.add(ch);
        }
        self.debugf("Discard", &[Field::new("char", ch)]);
        ch
    }

    fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    fn pos(&self) -> Position {
        self.pos
    }

    fn debugf(&self, message: &str, fields: &[Field<'_>]) {
        if !self.hook.enabled() {
            return;
        }
        let mut attrs = self.log_attrs();
        attrs.extend_from_slice(fields);
        self.hook.debug(&format!("lexkit: {message}"), &attrs);
    }

    fn errorf(&mut self, message: &str, fields: &[Field<'_>]) {
        let error = Error::Reported {
            position: self.pos,
            message: message.to_owned(),
        };
        self.record(error, message, fields);
    }
}
