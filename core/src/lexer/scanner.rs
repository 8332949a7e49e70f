use super::cursor::Cursor;
use super::token::{Span, Token, TokenKind};
use crate::errors::SyntaxError;

/// Scans script source into a sequence of tokens.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;
            if self.cursor.is_at_end() {
                break;
            }
            let token = self.scan_token()?;
            tokens.push(token);
        }

        let eof_pos = self.cursor.pos();
        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(eof_pos, eof_pos),
        });

        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.cursor.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.cursor.advance();
                }
                Some(b'/') if self.cursor.peek_next() == Some(b'/') => {
                    while let Some(ch) = self.cursor.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                Some(b'/') if self.cursor.peek_next() == Some(b'*') => {
                    let start = self.cursor.pos();
                    self.cursor.advance(); // skip /
                    self.cursor.advance(); // skip *
                    loop {
                        match self.cursor.advance() {
                            Some(b'*') if self.cursor.peek() == Some(b'/') => {
                                self.cursor.advance();
                                break;
                            }
                            None => {
                                return Err(SyntaxError::new(
                                    "unterminated block comment",
                                    start,
                                    self.cursor.pos() - start,
                                ));
                            }
                            _ => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, SyntaxError> {
        let start = self.cursor.pos();
        let Some(ch) = self.cursor.advance() else {
            return Err(SyntaxError::new("unexpected end of input", start, 0));
        };

        let kind = match ch {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            b'=' => TokenKind::Assign,
            b'-' => TokenKind::Minus,
            b'"' | b'\'' => self.scan_string(ch, start)?,
            c if c.is_ascii_digit() => self.scan_number(start)?,
            c if is_ident_start(c) => self.scan_identifier(start),
            _ => {
                return Err(SyntaxError::new(
                    format!("unexpected character '{}'", ch as char),
                    start,
                    1,
                ));
            }
        };

        let end = self.cursor.pos();
        Ok(Token {
            kind,
            span: Span::new(start, end),
        })
    }

    fn scan_string(&mut self, quote: u8, start: usize) -> Result<TokenKind, SyntaxError> {
        let mut bytes = Vec::new();
        loop {
            match self.cursor.advance() {
                Some(c) if c == quote => break,
                Some(b'\\') => match self.cursor.advance() {
                    Some(b'n') => bytes.push(b'\n'),
                    Some(b't') => bytes.push(b'\t'),
                    Some(b'\\') => bytes.push(b'\\'),
                    Some(c) if c == quote => bytes.push(c),
                    Some(c) => {
                        bytes.push(b'\\');
                        bytes.push(c);
                    }
                    None => {
                        return Err(SyntaxError::new(
                            "unterminated string literal",
                            start,
                            self.cursor.pos() - start,
                        ));
                    }
                },
                Some(c) => bytes.push(c),
                None => {
                    return Err(SyntaxError::new(
                        "unterminated string literal",
                        start,
                        self.cursor.pos() - start,
                    ));
                }
            }
        }
        Ok(TokenKind::String(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn scan_number(&mut self, start: usize) -> Result<TokenKind, SyntaxError> {
        self.skip_digits();

        if self.cursor.peek() == Some(b'.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // consume '.'
            self.skip_digits();
        }

        let text = self.cursor.slice_from(start);
        text.parse::<f64>().map(TokenKind::Number).map_err(|err| {
            SyntaxError::new(
                format!("invalid number literal '{text}': {err}"),
                start,
                text.len(),
            )
        })
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.cursor.peek() {
            if c.is_ascii_digit() {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.cursor.peek() {
            if is_ident_continue(c) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let text = self.cursor.slice_from(start);
        match text.as_str() {
            "let" => TokenKind::Let,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Ident(text),
        }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}
