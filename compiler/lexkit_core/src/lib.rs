//! Building blocks for hand-written tokenizers.
//!
//! A caller writes a *scan function* that pulls code points from a
//! [`Reader`] and returns an integer token tag. [`TokenLexer`] runs it
//! repeatedly, packaging each lexeme as a [`Token`] with source
//! [`Position`]s, in the shape an LALR-style parser driver expects:
//!
//! ```
//! use lexkit_core::{FnScanner, Lexer, Reader, StreamReader, TokenLexer, EOF};
//!
//! let scan = |r: &mut StreamReader<&[u8]>| {
//!     r.discard_while(char::is_whitespace);
//!     r.next_while(char::is_alphabetic);
//!     if r.buffer().is_empty() { EOF } else { 1 }
//! };
//! let mut lexer = TokenLexer::new(FnScanner::new(StreamReader::from_bytes(b"to be"), scan));
//!
//! let mut words = Vec::new();
//! while lexer.do_lex(|tok| words.push(tok.into_value())) != EOF {}
//!
//! assert!(lexer.err().is_none());
//! assert_eq!(words, ["to", "be"]);
//! ```
//!
//! The reader's error slot is sticky: once a read fails or a parser calls
//! [`Scanner::error`], every further read and lex cycle yields end of input.

mod error;
mod hook;
mod lexer;
mod position;
mod reader;
mod scanner;
mod token;

pub use error::{Error, ErrorKind};
pub use hook::{init_tracing, DebugHook, Field, FieldValue, Fields, NoopHook, TracingHook, LOG_ENV};
pub use lexer::{Lexer, TokenLexer, Tokens};
pub use position::Position;
pub use reader::{Reader, StreamReader};
pub use scanner::{FnScanner, Scanner};
pub use token::{Token, TokenTag, EOF};
