//! Tokens produced by a lex cycle.

use std::fmt;

use serde::Serialize;

use crate::Position;

/// Integer token-type tag, as handed to an LALR-style parser driver.
pub type TokenTag = i32;

/// Sentinel tag meaning "no more tokens": end of input, a deliberate stop,
/// or a sticky reader error.
pub const EOF: TokenTag = -1;

/// A classified lexeme with optional source span.
///
/// Serializes as `{"type", "value", "start", "end"}`, with `start`/`end`
/// set to `null` when positions are not tracked.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    tag: TokenTag,
    value: String,
    start: Option<Position>,
    end: Option<Position>,
}

impl Token {
    /// Create a token without position information.
    pub fn new(tag: TokenTag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
            start: None,
            end: None,
        }
    }

    /// Create a token spanning `start..end`.
    pub fn with_span(tag: TokenTag, value: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            tag,
            value: value.into(),
            start: Some(start),
            end: Some(end),
        }
    }

    #[inline]
    pub fn tag(&self) -> TokenTag {
        self.tag
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Both ends of the span, when positions were tracked.
    pub fn span(&self) -> Option<(Position, Position)> {
        self.start.zip(self.end)
    }

    /// Consume the token, keeping only its literal text.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.tag, self.value)
    }
}
