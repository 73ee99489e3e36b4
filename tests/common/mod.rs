#![allow(dead_code)]

use caddyfile_engine::{Document, Dispenser, format, from_json, parse_str, to_json};

/// Caddyfile text and its canonical JSON, in both directions.
pub const CASES: &[(&str, &str)] = &[
    (
        "foo {\n\troot /bar\n}",
        r#"[{"hosts":["foo"],"body":[["root","/bar"]]}]"#,
    ),
    (
        "host1, host2 {\n\tdir {\n\t\tdef\n\t}\n}",
        r#"[{"hosts":["host1","host2"],"body":[["dir",[["def"]]]]}]"#,
    ),
    (
        "host1, host2 {\n\tdir abc {\n\t\tdef ghi\n\t\tjkl\n\t}\n}",
        r#"[{"hosts":["host1","host2"],"body":[["dir","abc",[["def","ghi"],["jkl"]]]]}]"#,
    ),
    (
        "host1:1234, host2:5678 {\n\tdir abc {\n\t}\n}",
        r#"[{"hosts":["host1:1234","host2:5678"],"body":[["dir","abc",[]]]}]"#,
    ),
    (
        "host {\n\tfoo \"bar baz\"\n}",
        r#"[{"hosts":["host"],"body":[["foo","bar baz"]]}]"#,
    ),
    (
        "host, host:80 {\n\tfoo \"bar \\\"baz\\\"\"\n}",
        r#"[{"hosts":["host","host:80"],"body":[["foo","bar \"baz\""]]}]"#,
    ),
    (
        "host {\n\tfoo \"bar\nbaz\"\n}",
        r#"[{"hosts":["host"],"body":[["foo","bar\nbaz"]]}]"#,
    ),
    (
        "host {\n\tdir 123 4.56 true\n}",
        r#"[{"hosts":["host"],"body":[["dir","123","4.56","true"]]}]"#,
    ),
    (
        "host {\n\tdir1 a b\n\tdir2 c d\n}",
        r#"[{"hosts":["host"],"body":[["dir1","a","b"],["dir2","c","d"]]}]"#,
    ),
    (
        "host {\n\tdir a b\n\tdir c d\n}",
        r#"[{"hosts":["host"],"body":[["dir","a","b"],["dir","c","d"]]}]"#,
    ),
    (
        "host {\n\tdir1 a b\n\tdir2 {\n\t\tc\n\t\td\n\t}\n}",
        r#"[{"hosts":["host"],"body":[["dir1","a","b"],["dir2",[["c"],["d"]]]]}]"#,
    ),
    (
        "host1 {\n\tdir1\n}\n\nhost2 {\n\tdir2\n}",
        r#"[{"hosts":["host1"],"body":[["dir1"]]},{"hosts":["host2"],"body":[["dir2"]]}]"#,
    ),
];

/// Parse then format should reproduce canonical input exactly.
pub fn roundtrip(input: &str) {
    let doc = parse_str(input).expect("parse failed");
    let output = format(&doc);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Caddyfile -> JSON -> Caddyfile should reproduce canonical input.
pub fn json_roundtrip(input: &str) {
    let json = to_json(input).unwrap_or_else(|e| panic!("to_json failed: {e}\n{input}"));
    let back = from_json(&json).unwrap_or_else(|e| panic!("from_json failed: {e}\n{json}"));
    assert_eq!(
        back, input,
        "JSON round-trip mismatch:\n--- json ---\n{json}\n--- got ---\n{back}"
    );
}

/// Format a document, parse it back, assert structural equality.
pub fn assert_document_roundtrip(original: &Document) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });
    assert_eq!(
        original, &parsed,
        "document mismatch\n--- formatted ---\n{formatted}"
    );
}

pub fn dispenser(input: &str) -> Dispenser {
    Dispenser::from_input(input).expect("tokenize failed")
}
