//! Property-based tests with proptest.
//!
//! Generate random documents and check that canonical text and
//! canonical JSON convert into each other exactly:
//! `to_json(from_json(j)) == j` and `from_json(to_json(t)) == t`.

use caddyfile_engine::{BodyEntry, Document, ServerBlock, format, from_json, parse_str, to_json};
use proptest::prelude::*;

// -- Leaf strategies --

/// Safe directive name: lowercase alpha start, then alphanumeric + _ -
fn directive_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}".prop_map(|s| s)
}

/// Unquoted argument: no whitespace, braces, or quotes.
fn unquoted_arg() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/.:_*-][a-zA-Z0-9/.:_*#\\\\-]{0,20}".prop_map(|s| s)
}

/// Argument that has to be quoted to survive as one token.
fn quoted_arg() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8} [a-z]{1,8}",
        "[a-z]{1,5}\"[a-z]{1,5}\"",
        "\\{[a-z]{1,8}\\}",
        "#[a-z]{1,8}",
        "[a-z]{1,5}\n[a-z]{1,5}",
        "[a-z]{1,4} [a-z]{0,4}\\\\",
        "[a-z]{1,4}\"\\\\",
        "[a-z]{1,3} \\\\[a-z\"\\\\]{0,3}",
    ]
}

fn argument() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => unquoted_arg(),
        1 => quoted_arg(),
    ]
}

fn arguments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(argument(), 0..=4)
}

/// Body entry at a given depth (limits recursion)
fn entry(depth: u32) -> impl Strategy<Value = BodyEntry> {
    let leaf = (directive_name(), arguments()).prop_map(|(name, args)| BodyEntry {
        name,
        args,
        nested: None,
    });

    if depth == 0 {
        leaf.boxed()
    } else {
        let with_block = (
            directive_name(),
            arguments(),
            prop::collection::vec(entry(depth - 1), 0..=3),
        )
            .prop_map(|(name, args, sub)| BodyEntry {
                name,
                args,
                nested: Some(sub),
            });

        prop_oneof![
            3 => leaf,
            1 => with_block,
        ]
        .boxed()
    }
}

/// Canonical host: plain name, optionally with a port or folded scheme.
fn host() -> impl Strategy<Value = String> {
    (
        "[a-z]{2,8}\\.(com|org|net|io)",
        prop_oneof![
            Just(String::new()),
            Just(":http".to_string()),
            Just(":https".to_string()),
            (1u16..=65535).prop_map(|p| format!(":{p}")),
        ],
    )
        .prop_map(|(name, suffix)| format!("{name}{suffix}"))
}

fn server_block() -> impl Strategy<Value = ServerBlock> {
    (
        prop::collection::vec(host(), 1..=3),
        prop::collection::vec(entry(2), 0..=5),
    )
        .prop_map(|(hosts, body)| ServerBlock { hosts, body })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(server_block(), 0..=3).prop_map(|blocks| Document { blocks })
}

// -- Property tests --

proptest! {
    /// Canonical text survives the trip through JSON byte for byte.
    #[test]
    fn text_json_text(doc in document()) {
        let text = format(&doc);
        let json = to_json(&text).map_err(|e| {
            TestCaseError::fail(std::format!("to_json error: {e}\n--- text ---\n{text}"))
        })?;
        let back = from_json(&json).map_err(|e| {
            TestCaseError::fail(std::format!("from_json error: {e}\n--- json ---\n{json}"))
        })?;
        prop_assert_eq!(back, text);
    }

    /// Canonical JSON survives the trip through text byte for byte.
    #[test]
    fn json_text_json(doc in document()) {
        let json = doc.to_json().unwrap();
        let text = from_json(&json).unwrap();
        prop_assert_eq!(to_json(&text).unwrap(), json);
    }

    /// Formatting then parsing yields the same document.
    #[test]
    fn parse_inverts_format(doc in document()) {
        let text = format(&doc);
        let parsed = parse_str(&text).map_err(|e| {
            TestCaseError::fail(std::format!("parse error: {e}\n--- text ---\n{text}"))
        })?;
        prop_assert_eq!(parsed, doc);
    }

    /// Arbitrary input never panics the converter.
    #[test]
    fn to_json_never_panics(input in "[a-z{}\" \n#,:/]{0,64}") {
        let _ = to_json(&input);
    }
}
