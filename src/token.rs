/// A single lexical token with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
    /// Whether the token was written as `"..."` in the source.
    pub quoted: bool,
}

impl Token {
    /// Create an unquoted token.
    #[must_use]
    pub fn word(text: &str, line: usize) -> Self {
        Self {
            text: text.to_string(),
            line,
            quoted: false,
        }
    }

    /// True for an unquoted `{`.
    #[must_use]
    pub fn is_open_brace(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    /// True for an unquoted `}`.
    #[must_use]
    pub fn is_close_brace(&self) -> bool {
        !self.quoted && self.text == "}"
    }

    /// Line on which the token ends; differs from `line` only for
    /// quoted tokens spanning literal newlines.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.line + self.text.bytes().filter(|&b| b == b'\n').count()
    }
}
