use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::token::Token;

/// Tokenize Caddyfile source into a flat sequence of tokens.
///
/// Whitespace separates tokens and is discarded; line numbers are
/// recorded on each token so that statement boundaries can be
/// recovered later. `{` and `}` are always standalone tokens unless
/// they appear inside a quoted token.
///
/// # Errors
///
/// Returns `SyntaxError` when a quoted token is never closed.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let tokens = Lexer::new(input).tokenize()?;
    tracing::trace!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            input: bytes,
            pos: start,
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => self.advance(),
                b'#' => self.skip_comment(),
                b'{' | b'}' => {
                    tokens.push(Token {
                        text: char::from(ch).to_string(),
                        line: self.line,
                        quoted: false,
                    });
                    self.advance();
                }
                b'"' => tokens.push(self.read_quoted()?),
                _ => tokens.push(self.read_word()),
            }
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    // Byte after the current one.
    fn escaped(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            if ch == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_quoted(&mut self) -> Result<Token, SyntaxError> {
        let start_line = self.line;
        self.advance(); // opening quote

        let mut value = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedQuote,
                        start_line,
                    ));
                }
                Some(b'\\') if matches!(self.escaped(), Some(b'"' | b'\\')) => {
                    self.advance();
                    if let Some(escaped) = self.peek() {
                        value.push(escaped);
                    }
                    self.advance();
                }
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Ok(Token {
            text: String::from_utf8_lossy(&value).into_owned(),
            line: start_line,
            quoted: true,
        })
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;

        while let Some(ch) = self.peek() {
            if matches!(ch, b' ' | b'\t' | b'\r' | b'\n' | b'{' | b'}') {
                break;
            }
            self.pos += 1;
        }

        Token {
            text: String::from_utf8_lossy(&self.input[start..self.pos]).into_owned(),
            line: self.line,
            quoted: false,
        }
    }
}
