//! Serializes a `Document` back into canonical Caddyfile text.
//!
//! Tab-indented, one blank line between server blocks, no trailing
//! newline. This is the exact text `from_json` produces.

use crate::ast::{BodyEntry, Document, ServerBlock};

/// Format a `Document` as canonical Caddyfile text.
#[must_use]
pub fn format(document: &Document) -> String {
    let mut out = String::new();

    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        format_server_block(&mut out, block);
    }

    out
}

fn format_server_block(out: &mut String, block: &ServerBlock) {
    for (i, host) in block.hosts.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_value(out, host, needs_quotes(host) || host.contains(','));
    }

    out.push_str(" {\n");
    format_entries(out, &block.body, 1);
    out.push('}');
}

fn format_entries(out: &mut String, entries: &[BodyEntry], indent: usize) {
    for entry in entries {
        format_entry(out, entry, indent);
    }
}

fn format_entry(out: &mut String, entry: &BodyEntry, indent: usize) {
    let prefix = "\t".repeat(indent);
    out.push_str(&prefix);
    push_value(out, &entry.name, needs_quotes(&entry.name));

    for arg in &entry.args {
        out.push(' ');
        push_value(out, arg, needs_quotes(arg));
    }

    if let Some(nested) = &entry.nested {
        out.push_str(" {\n");
        format_entries(out, nested, indent + 1);
        out.push_str(&prefix);
        out.push('}');
    }
    out.push('\n');
}

// Newlines stay raw inside the quotes. `"` is escaped, and so is a
// backslash that would otherwise read as an escape.
fn push_value(out: &mut String, value: &str, quoted: bool) {
    if !quoted {
        out.push_str(value);
        return;
    }

    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' if matches!(chars.peek().copied(), None | Some('"' | '\\')) => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Whether a value must be quoted to read back as one token.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.starts_with('#')
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '{' | '}'))
}
