use std::fmt;

use crate::directive::SetupError;

/// Classifies a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Quoted token with no closing `"`.
    UnterminatedQuote,
    /// Expected `{` after a host list, found something else or EOF.
    ExpectedOpenBrace { found: Option<String> },
    /// Input ended inside a block.
    ExpectedCloseBrace,
    /// `{` where a directive name was expected.
    UnexpectedOpenBrace,
    /// `}` with no block open.
    UnexpectedCloseBrace,
    /// Leading, doubled, or trailing comma in a host list.
    UnexpectedComma,
    /// Block opened with no host in front of it.
    MissingHosts,
    /// Directive argument missing or line ended early.
    WrongArgCount { after: String },
    /// Free-form message raised by a directive compiler.
    Custom(String),
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote => write!(f, "unterminated quoted token"),
            Self::ExpectedOpenBrace { found: None } => {
                write!(f, "expected '{{'")
            }
            Self::ExpectedOpenBrace { found: Some(t) } => {
                write!(f, "expected '{{', got '{t}'")
            }
            Self::ExpectedCloseBrace => {
                write!(f, "expected '}}' before end of input")
            }
            Self::UnexpectedOpenBrace => write!(f, "unexpected '{{'"),
            Self::UnexpectedCloseBrace => write!(f, "unexpected '}}'"),
            Self::UnexpectedComma => write!(f, "unexpected ',' in host list"),
            Self::MissingHosts => write!(f, "server block has no hosts"),
            Self::WrongArgCount { after } => {
                write!(
                    f,
                    "wrong argument count or unexpected line ending after '{after}'"
                )
            }
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

/// Malformed token stream or block structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: usize,
}

impl SyntaxError {
    pub(crate) const fn new(kind: SyntaxErrorKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// JSON input that does not match the canonical schema.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Malformed JSON or wrong shape (arity, missing keys, types).
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    /// A server block with an empty `hosts` array.
    #[error("server block {index} has no hosts")]
    EmptyHosts { index: usize },
}

/// Unified error type covering every stage of the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tokenizer or block parser error.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// JSON codec error.
    #[error("{0}")]
    Encoding(#[from] EncodingError),
    /// Directive compiler error.
    #[error("{0}")]
    Setup(#[from] SetupError),
}
