//! End-to-end lexing through the public API, the way a parser driver uses it.

use std::io::{self, Read};

use lexkit_core::{
    ErrorKind, FnScanner, Lexer, Position, Reader, Scanner, StreamReader, Token, TokenLexer,
    TokenTag, EOF,
};
use pretty_assertions::assert_eq;

const IDENT: TokenTag = 1;
const NUMBER: TokenTag = 10;
const PIPE: TokenTag = 101;
const AMP: TokenTag = 102;

/// Drive `scan` over `input` the way a generated parser would, returning
/// `(tag, value)` pairs.
fn lex_all<F>(input: &'static str, scan: F) -> Vec<(TokenTag, String)>
where
    F: FnMut(&mut StreamReader<&'static [u8]>) -> TokenTag,
{
    let reader = StreamReader::from_bytes(input.as_bytes());
    let mut lexer = TokenLexer::new(FnScanner::new(reader, scan));
    let mut got = Vec::new();
    while lexer.do_lex(|tok| got.push((tok.tag(), tok.into_value()))) != EOF {}
    assert!(lexer.err().is_none(), "unexpected error: {:?}", lexer.err());
    got
}

fn pairs(items: &[(TokenTag, &str)]) -> Vec<(TokenTag, String)> {
    items.iter().map(|&(t, v)| (t, v.to_owned())).collect()
}

#[test]
fn bit_operations() {
    let got = lex_all("1001 | 1111 & 1011", |r| {
        r.discard_while(char::is_whitespace);
        match r.peek() {
            Some('0' | '1') => {
                r.next_while(|ch| ch == '0' || ch == '1');
                NUMBER
            }
            Some('|') => {
                r.next();
                PIPE
            }
            Some('&') => {
                r.next();
                AMP
            }
            _ => EOF,
        }
    });
    assert_eq!(
        got,
        pairs(&[
            (NUMBER, "1001"),
            (PIPE, "|"),
            (NUMBER, "1111"),
            (AMP, "&"),
            (NUMBER, "1011"),
        ])
    );
}

#[test]
fn identifiers_delimited_by_space() {
    let got = lex_all("to be or not to be", |r| {
        r.discard_while(char::is_whitespace);
        r.next_while(char::is_alphabetic);
        if r.buffer().is_empty() {
            EOF
        } else {
            IDENT
        }
    });
    assert_eq!(
        got,
        pairs(&[
            (IDENT, "to"),
            (IDENT, "be"),
            (IDENT, "or"),
            (IDENT, "not"),
            (IDENT, "to"),
            (IDENT, "be"),
        ])
    );
}

#[test]
fn identifiers_and_digits() {
    let got = lex_all("2 be or not 22 be99", |r| {
        r.discard_while(char::is_whitespace);
        match r.peek() {
            Some(ch) if ch.is_ascii_digit() => {
                r.next_while(|c| c.is_ascii_digit());
                NUMBER
            }
            Some(ch) if ch.is_alphabetic() => {
                r.next_while(char::is_alphabetic);
                IDENT
            }
            _ => EOF,
        }
    });
    assert_eq!(
        got,
        pairs(&[
            (NUMBER, "2"),
            (IDENT, "be"),
            (IDENT, "or"),
            (IDENT, "not"),
            (NUMBER, "22"),
            (IDENT, "be"),
            (NUMBER, "99"),
        ])
    );
}

#[test]
fn multibyte_tokens_carry_byte_offsets_and_char_columns() {
    let reader = StreamReader::from_bytes("テキスト text\nok".as_bytes());
    let mut lexer = TokenLexer::new(FnScanner::new(reader, |r: &mut StreamReader<&[u8]>| {
        r.discard_while(char::is_whitespace);
        r.next_while(char::is_alphabetic);
        if r.buffer().is_empty() {
            EOF
        } else {
            IDENT
        }
    }));
    let tokens: Vec<Token> = lexer.tokens().collect();

    let ends: Vec<(String, Option<Position>)> = tokens
        .into_iter()
        .map(|t| (t.value().to_owned(), t.end()))
        .collect();
    assert_eq!(
        ends,
        vec![
            ("テキスト".to_owned(), Some(Position::new(1, 4, 12))),
            ("text".to_owned(), Some(Position::new(1, 9, 17))),
            ("ok".to_owned(), Some(Position::new(2, 2, 20))),
        ]
    );
}

/// Serves `data`, then fails.
struct BrokenPipe {
    data: &'static [u8],
}

impl Read for BrokenPipe {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.data.read(out)
    }
}

#[test]
fn read_failure_ends_session_with_error() {
    let reader = StreamReader::new(BrokenPipe { data: b"ok then" });
    let mut lexer = TokenLexer::new(FnScanner::new(reader, |r: &mut StreamReader<BrokenPipe>| {
        r.discard_while(char::is_whitespace);
        r.next_while(char::is_alphabetic);
        if r.buffer().is_empty() {
            EOF
        } else {
            IDENT
        }
    }));

    let values: Vec<String> = lexer.tokens().map(Token::into_value).collect();
    // "then" is cut short by the failing read at end of data.
    assert_eq!(values, ["ok"]);

    let err = lexer.err().map(|e| (e.kind(), e.position()));
    assert_eq!(err, Some((ErrorKind::Io, Position::new(1, 7, 7))));

    // The session stays terminated.
    assert_eq!(lexer.do_lex(|_| {}), EOF);
    assert_eq!(lexer.scanner_mut().reader_mut().peek(), None);
}

#[test]
fn parser_error_distinguishes_abort_from_clean_end() {
    let reader = StreamReader::from_bytes(b"a ) b".as_slice());
    let mut lexer = TokenLexer::new(FnScanner::new(reader, |r: &mut StreamReader<&[u8]>| {
        r.discard_while(char::is_whitespace);
        match r.peek() {
            Some(')') => {
                r.next();
                2
            }
            Some(_) => {
                r.next_while(char::is_alphabetic);
                IDENT
            }
            None => EOF,
        }
    }));

    // A toy grammar that rejects a closing paren with nothing open.
    loop {
        let mut tag = EOF;
        if lexer.do_lex(|tok| tag = tok.tag()) == EOF {
            break;
        }
        if tag == 2 {
            lexer.error("syntax error: unexpected ')'");
        }
    }

    let err = lexer.err().map(|e| (e.kind(), e.to_string(), e.position()));
    assert_eq!(
        err,
        Some((
            ErrorKind::Reported,
            "lexkit: syntax error: unexpected ')'".to_owned(),
            Position::new(1, 3, 3)
        ))
    );
}

#[test]
fn invalid_utf8_lexes_as_replacement_character() {
    let reader = StreamReader::from_bytes(b"caf\xe9 ok");
    let mut lexer = TokenLexer::new(FnScanner::new(reader, |r: &mut StreamReader<&[u8]>| {
        r.discard_while(char::is_whitespace);
        r.next_while(|ch| !ch.is_whitespace());
        if r.buffer().is_empty() {
            EOF
        } else {
            IDENT
        }
    }));

    let tokens: Vec<Token> = lexer.tokens().collect();
    let values: Vec<&str> = tokens.iter().map(Token::value).collect();
    assert_eq!(values, ["caf\u{FFFD}", "ok"]);
    assert_eq!(tokens[1].end(), Some(Position::new(1, 7, 9)));
    assert!(lexer.err().is_none());
}
