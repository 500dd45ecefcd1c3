//! The lex-one-token cycle behind a yacc-style `Lex` callback.
//!
//! An external parser driver calls [`Lexer::do_lex`] until it returns
//! [`EOF`], then checks [`TokenLexer::err`] to tell a clean end of input
//! from an aborted session:
//!
//! ```text
//! Ready --token--> Ready
//! Ready --read failure / error()--> Error      (terminal, err() is Some)
//! Ready --scan returns EOF--> Exhausted         (terminal, err() is None)
//! ```
//!
//! A typical adapter for a generated parser:
//!
//! ```text
//! impl yyLexer for MyLexer {
//!     fn lex(&mut self, lval: &mut SymType) -> i32 {
//!         self.inner.do_lex(|tok| lval.token = tok)
//!     }
//!     fn error(&mut self, msg: &str) {
//!         self.inner.error(msg)
//!     }
//! }
//! ```

use crate::{Error, Field, Position, Reader, Scanner, Token, TokenTag, EOF};

/// Runs scan cycles and packages each lexeme as a [`Token`].
pub trait Lexer {
    type Scanner: Scanner;

    fn scanner(&self) -> &Self::Scanner;

    fn scanner_mut(&mut self) -> &mut Self::Scanner;

    /// Lex one token and hand it to `callback`.
    ///
    /// Returns the token's tag, or [`EOF`] at end of input or once an error
    /// is set. The callback is not invoked when [`EOF`] is returned.
    fn do_lex<F>(&mut self, callback: F) -> TokenTag
    where
        F: FnOnce(Token);
}

/// The concrete [`Lexer`]: tokens span from where the previous cycle ended
/// to where this one ended.
pub struct TokenLexer<S> {
    scanner: S,
    /// Reader position at the end of the last emitted token.
    pos: Position,
}

impl<S: Scanner> TokenLexer<S> {
    pub fn new(scanner: S) -> Self {
        let pos = scanner.reader().pos();
        Self { scanner, pos }
    }

    /// The reader's sticky error; `None` after the loop means a clean end.
    pub fn err(&self) -> Option<&Error> {
        self.scanner.reader().err()
    }

    /// Forward a parser-reported error into the sticky slot.
    pub fn error(&mut self, message: &str) {
        self.scanner.error(message);
    }

    /// Iterate over tokens until [`EOF`].
    pub fn tokens(&mut self) -> Tokens<'_, S> {
        Tokens { lexer: self }
    }

    pub fn into_scanner(self) -> S {
        self.scanner
    }
}

impl<S: Scanner> Lexer for TokenLexer<S> {
    type Scanner = S;

    fn scanner(&self) -> &S {
        &self.scanner
    }

    fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    fn do_lex<F>(&mut self, callback: F) -> TokenTag
    where
        F: FnOnce(Token),
    {
        if self.err().is_some() {
            return EOF;
        }
        let start = self.pos;
        let tag = self.scanner.scan();
        if tag == EOF || self.err().is_some() {
            return EOF;
        }

        let reader = self.scanner.reader();
        let end = reader.pos();
        self.pos = end;
        callback(Token::with_span(tag, reader.buffer(), start, end));
        reader.debugf(
            "Lex",
            &[
                Field::new("type", tag),
                Field::new("value", reader.buffer()),
                Field::new("start.line", start.line()),
                Field::new("start.column", start.column()),
                Field::new("start.offset", start.offset()),
                Field::new("end.line", end.line()),
                Field::new("end.column", end.column()),
                Field::new("end.offset", end.offset()),
            ],
        );
        self.scanner.reader_mut().reset_buffer();
        tag
    }
}

/// Iterator returned by [`TokenLexer::tokens`].
pub struct Tokens<'a, S> {
    lexer: &'a mut TokenLexer<S>,
}

impl<S: Scanner> Iterator for Tokens<'_, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut token = None;
        self.lexer.do_lex(|tok| token = Some(tok));
        token
    }
}
