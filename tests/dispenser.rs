//! Dispenser behaviour as seen by a directive compiler.

mod common;

use caddyfile_engine::{Dispenser, SyntaxErrorKind, Token};
use common::dispenser;

// -----------------------------------------------------------
// Statement navigation.
// -----------------------------------------------------------

#[test]
fn statements_by_next_token_and_remaining_args() {
    let mut d = dispenser("gzip\nroot /srv\next .html .htm\n");
    let mut statements = Vec::new();
    while d.next_token() {
        let mut line = vec![d.val().to_string()];
        line.extend(d.remaining_args());
        statements.push(line);
    }
    assert_eq!(
        statements,
        [
            vec!["gzip"],
            vec!["root", "/srv"],
            vec!["ext", ".html", ".htm"]
        ]
    );
}

#[test]
fn next_arg_returns_values_in_order() {
    let mut d = dispenser("dir a \"b c\" d");
    assert!(d.next_token());
    assert_eq!(d.next_arg(), Some("a"));
    assert_eq!(d.next_arg(), Some("b c"));
    assert!(d.is_quoted());
    assert_eq!(d.next_arg(), Some("d"));
    assert_eq!(d.next_arg(), None);
}

#[test]
fn peek_does_not_advance() {
    let mut d = dispenser("a b");
    assert_eq!(d.peek().map(|t| t.text.as_str()), Some("a"));
    assert!(d.current().is_none());
    assert!(d.next());
    assert_eq!(d.cursor(), Some(0));
}

#[test]
fn built_from_tokens() {
    let mut d = Dispenser::new(vec![Token::word("redir", 7), Token::word("/x", 7)]);
    assert!(d.next_token());
    assert_eq!(d.line(), 7);
    assert_eq!(d.remaining_args(), ["/x"]);
    assert_eq!(d.tokens().len(), 2);
}

// -----------------------------------------------------------
// Blocks.
// -----------------------------------------------------------

#[test]
fn block_follows_only_for_unquoted_brace() {
    let mut d = dispenser("dir \"{\"\ndir {\n}");
    assert!(d.next_token());
    assert!(!d.block_follows());
    d.remaining_args();
    assert!(d.next_token());
    assert!(d.block_follows());
}

#[test]
fn two_statements_with_blocks() {
    let mut d = dispenser("redir {\n / /foo 304 \n} \n redir {\n /bar /foobar 305 \n}");
    let mut lines = Vec::new();
    while d.next_token() {
        let level = d.nesting();
        while d.next_block(level) {
            let mut line = vec![d.val().to_string()];
            line.extend(d.remaining_args());
            lines.push(line);
        }
    }
    assert_eq!(lines, [["/", "/foo", "304"], ["/bar", "/foobar", "305"]]);
}

#[test]
fn statement_after_close_brace_on_same_line() {
    let mut d = dispenser("a {\n x \n} b {\n y \n}");
    let mut names = Vec::new();
    while d.next_token() {
        names.push(d.val().to_string());
        while d.next_block(0) {
            names.push(d.val().to_string());
        }
    }
    assert_eq!(names, ["a", "x", "b", "y"]);
}

#[test]
fn unclosed_block_ends_walk() {
    let mut d = dispenser("dir {\n\ta\n\tb");
    assert!(d.next_token());
    let mut count = 0;
    while d.next_block(0) {
        count += 1;
    }
    assert_eq!(count, 2);
    assert!(!d.next_token());
    assert_eq!(d.nesting(), 1);
    let err = d.expect_closed(0).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::ExpectedCloseBrace);
    assert_eq!(err.line, 3);
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn arg_err_on_open_brace() {
    let mut d = dispenser("dir {\n}");
    assert!(d.next_token());
    assert!(d.next());
    let err = d.arg_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedOpenBrace);
}

#[test]
fn custom_err_message() {
    let mut d = dispenser("a\nb");
    assert!(d.next_token());
    assert!(d.next_token());
    let err = d.err("bad value");
    assert_eq!(err.to_string(), "bad value at line 2");
}
