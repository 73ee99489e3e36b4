//! Caddyfile configuration-language engine.
//!
//! Tokenizes Caddyfile text, parses it into server blocks, converts
//! it to and from a canonical JSON form, and exposes the token cursor
//! ([`Dispenser`]) that directive compilers use to read their
//! arguments and blocks.
//!
//! # Quick start
//!
//! ## Caddyfile to JSON and back
//!
//! ```
//! use caddyfile_engine::{from_json, to_json};
//!
//! let input = "host1, host2 {\n\tdir abc {\n\t\tdef ghi\n\t\tjkl\n\t}\n}";
//! let json = to_json(input).unwrap();
//! assert_eq!(
//!     json,
//!     r#"[{"hosts":["host1","host2"],"body":[["dir","abc",[["def","ghi"],["jkl"]]]]}]"#
//! );
//! assert_eq!(from_json(&json).unwrap(), input);
//! ```
//!
//! ## Compile a directive
//!
//! ```
//! use caddyfile_engine::{Dispenser, redirect};
//!
//! let mut d = Dispenser::from_input("redir 302 {\n\t/foo\n}").unwrap();
//! let redir = redirect::setup(&mut d).unwrap();
//! assert_eq!(redir.rules[0].from_path, "/");
//! assert_eq!(redir.rules[0].to, "/foo");
//! assert_eq!(redir.rules[0].code, 302);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod directive;
pub mod dispenser;
pub mod error;
pub mod formatter;
pub mod host;
pub mod json;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod redirect;
pub mod token;

pub use ast::{BodyEntry, Document, ServerBlock};
pub use directive::{MiddlewareConfig, Registry, SetupError, SetupFn, registry};
pub use dispenser::Dispenser;
pub use error::{EncodingError, Error, SyntaxError, SyntaxErrorKind};
pub use formatter::format;
pub use host::normalize_host;
pub use json::{from_json, to_json};
pub use lexer::tokenize;
pub use loader::{SiteConfig, load, load_with};
pub use parser::parse;
pub use redirect::{Redirect, Rule};
pub use token::Token;

/// Tokenize and parse a Caddyfile source string in one step.
pub fn parse_str(input: &str) -> Result<Document, Error> {
    let tokens = tokenize(input)?;
    Ok(parse(tokens)?)
}
