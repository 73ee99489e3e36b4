//! Demonstrate error handling across parsing, decoding, and `redir`
//! compilation.

use caddyfile_engine::{Error, SetupError};

fn report(label: &str, result: Result<(), Error>) {
    println!("{label}:");
    match result {
        Ok(()) => println!("  OK"),
        Err(Error::Syntax(e)) => {
            println!("  Syntax error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Line: {}", e.line);
        }
        Err(Error::Encoding(e)) => println!("  Encoding error: {e}"),
        Err(Error::Setup(SetupError::Syntax(e))) => {
            println!("  Directive syntax error: {e}");
        }
        Err(Error::Setup(SetupError::Validation { message, line })) => {
            println!("  Invalid value at line {line}: {message}");
        }
        Err(Error::Setup(SetupError::Duplicate { message, line })) => {
            println!("  Duplicate at line {line}: {message}");
        }
    }
    println!();
}

fn main() {
    report(
        "Unterminated quote",
        caddyfile_engine::parse_str("example.com {\n\trespond \"unclosed\n}\n").map(drop),
    );

    report(
        "Unclosed brace",
        caddyfile_engine::parse_str("example.com {\n\tlog\n").map(drop),
    );

    report(
        "Empty hosts in JSON",
        caddyfile_engine::from_json(r#"[{"hosts":[],"body":[]}]"#).map(drop),
    );

    report(
        "Redirect code out of range",
        caddyfile_engine::load("example.com {\n\tredir /a /b 200\n}").map(drop),
    );

    report(
        "Duplicate redirect",
        caddyfile_engine::load("example.com {\n\tredir /a /b\n\tredir /a /b\n}").map(drop),
    );

    report(
        "Valid redirects",
        caddyfile_engine::load("example.com {\n\tredir 302 {\n\t\t/a /b\n\t\t/c /d 307\n\t}\n}")
            .map(|sites| println!("  {} site(s) compiled", sites.len())),
    );
}
