//! Token cursor shared by the block parser and directive compilers.
//!
//! A statement is a run of tokens on one line (a quoted token with
//! literal newlines extends its line). `next` and `next_arg` never
//! leave the current statement; `next_block` walks the statements
//! of a `{ ... }` block one at a time and consumes its closing `}`.
//!
//! ```
//! use caddyfile_engine::Dispenser;
//!
//! let mut d = Dispenser::from_input("redir 302 {\n\t/a /b\n\t/c /d\n}").unwrap();
//! assert!(d.next_token());
//! assert_eq!(d.remaining_args(), ["302"]);
//!
//! let level = d.nesting();
//! let mut lines = Vec::new();
//! while d.next_block(level) {
//!     let mut line = vec![d.val().to_string()];
//!     line.extend(d.remaining_args());
//!     lines.push(line);
//! }
//! assert_eq!(lines, [["/a", "/b"], ["/c", "/d"]]);
//! assert!(!d.next_token());
//! ```

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::lexer::tokenize;
use crate::token::Token;

/// Cursor over an owned token sequence.
#[derive(Debug, Clone)]
pub struct Dispenser {
    tokens: Vec<Token>,
    cursor: Option<usize>,
    nesting: usize,
}

impl Dispenser {
    /// Create a dispenser positioned before the first token.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: None,
            nesting: 0,
        }
    }

    /// Tokenize `input` and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the input cannot be tokenized.
    pub fn from_input(input: &str) -> Result<Self, SyntaxError> {
        Ok(Self::new(tokenize(input)?))
    }

    /// Advance to the next token of the current statement.
    ///
    /// Returns false without moving at a line break or an unquoted
    /// `}`. An unquoted `{` is part of the statement and is returned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if !self.next_on_same_line() || self.peek().is_some_and(Token::is_close_brace) {
            return false;
        }
        self.step();
        true
    }

    /// Advance to the next argument of the current statement and
    /// return its text. Block delimiters are never arguments.
    pub fn next_arg(&mut self) -> Option<&str> {
        let is_arg = self.next_on_same_line()
            && self
                .peek()
                .is_some_and(|t| !t.is_open_brace() && !t.is_close_brace());
        if !is_arg {
            return None;
        }
        self.step();
        Some(self.val())
    }

    /// Advance to the next token regardless of line boundaries.
    pub fn next_token(&mut self) -> bool {
        if self.peek().is_none() {
            return false;
        }
        self.step();
        true
    }

    /// Advance only if the next token starts a new statement.
    pub fn next_line(&mut self) -> bool {
        if self.peek().is_none() || (self.cursor.is_some() && self.next_on_same_line()) {
            return false;
        }
        self.step();
        true
    }

    /// Walk the statements of a block opened at nesting `level`.
    ///
    /// Capture `level` with [`Dispenser::nesting`] before the loop.
    /// The first call opens the block if the current statement ends
    /// in `{` and lands on the block's first token. Each later call
    /// skips what is left of the current statement (including any
    /// sub-block the caller did not open) and lands on the next one,
    /// returning false once the matching `}` has been consumed. At end
    /// of input the block stays open; see [`Dispenser::expect_closed`].
    pub fn next_block(&mut self, level: usize) -> bool {
        if self.nesting > level {
            self.skip_statement();
            if !self.next_token() {
                return false;
            }
            if self.current().is_some_and(Token::is_close_brace) {
                self.nesting -= 1;
                return false;
            }
            return true;
        }

        if !self.block_follows() {
            return false;
        }
        self.step(); // onto `{`
        self.nesting += 1;
        if !self.next_token() {
            return false;
        }
        if self.current().is_some_and(Token::is_close_brace) {
            self.nesting -= 1;
            return false;
        }
        true
    }

    /// Check, once [`Dispenser::next_block`] has returned false, that
    /// the block opened at `level` was closed.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedCloseBrace` at the current token when the input
    /// ended inside the block.
    pub fn expect_closed(&self, level: usize) -> Result<(), SyntaxError> {
        if self.nesting > level {
            return Err(self.syntax_err(SyntaxErrorKind::ExpectedCloseBrace));
        }
        Ok(())
    }

    /// Whether the current statement continues with an unquoted `{`.
    #[must_use]
    pub fn block_follows(&self) -> bool {
        self.next_on_same_line() && self.peek().is_some_and(Token::is_open_brace)
    }

    /// Collect the remaining arguments of the current statement.
    pub fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while let Some(arg) = self.next_arg() {
            args.push(arg.to_string());
        }
        args
    }

    /// Text of the current token, empty before the first token.
    #[must_use]
    pub fn val(&self) -> &str {
        self.current().map_or("", |t| t.text.as_str())
    }

    /// Whether the current token was quoted in the source.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.current().is_some_and(|t| t.quoted)
    }

    /// Line of the current token; before the first token this is the
    /// line of the first token, and 1 for empty input.
    #[must_use]
    pub fn line(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.first())
            .map_or(1, |t| t.line)
    }

    /// Number of blocks opened by `next_block` and not yet closed.
    #[must_use]
    pub const fn nesting(&self) -> usize {
        self.nesting
    }

    /// The token after the current one, without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next_index())
    }

    /// The current token, if the cursor has moved.
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|i| self.tokens.get(i))
    }

    /// Index of the current token.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All tokens held by this dispenser.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Error for a missing or surplus argument at the current token.
    #[must_use]
    pub fn arg_err(&self) -> SyntaxError {
        if self.current().is_some_and(Token::is_open_brace) {
            return self.syntax_err(SyntaxErrorKind::UnexpectedOpenBrace);
        }
        self.syntax_err(SyntaxErrorKind::WrongArgCount {
            after: self.val().to_string(),
        })
    }

    /// Error carrying a custom message at the current token.
    #[must_use]
    pub fn err(&self, msg: impl Into<String>) -> SyntaxError {
        self.syntax_err(SyntaxErrorKind::Custom(msg.into()))
    }

    /// Error of the given kind at the current token.
    #[must_use]
    pub fn syntax_err(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.line())
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |i| i + 1)
    }

    fn step(&mut self) {
        self.cursor = Some(self.next_index());
    }

    fn next_on_same_line(&self) -> bool {
        match (self.current(), self.peek()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(cur), Some(next)) => next.line == cur.end_line(),
        }
    }

    fn skip_statement(&mut self) {
        while self.next_on_same_line() {
            let opens = match self.peek() {
                Some(t) if t.is_close_brace() => break,
                Some(t) => t.is_open_brace(),
                None => break,
            };
            self.step();
            if opens {
                self.skip_block();
            }
        }
    }

    // Cursor sits on `{`; consume through its matching `}`.
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        while depth > 0 && self.next_token() {
            match self.current() {
                Some(t) if t.is_open_brace() => depth += 1,
                Some(t) if t.is_close_brace() => depth -= 1,
                _ => {}
            }
        }
    }
}
