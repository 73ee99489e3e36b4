//! Canonical JSON form of a Caddyfile and its inverse.
//!
//! ```text
//! [{"hosts":["host[:port]",...],"body":[[name,arg,...],[name,arg,...,[[...]]],...]},...]
//! ```
//!
//! Output is compact, `hosts` always precedes `body`, and every
//! directive argument is a JSON string, including ones that look
//! like numbers or booleans. A body entry's nested block, when
//! present, is the final element of its array.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ast::{BodyEntry, Document};
use crate::error::{EncodingError, Error};
use crate::formatter;
use crate::lexer::tokenize;
use crate::parser::parse;

/// Convert Caddyfile text to canonical JSON.
///
/// ```
/// let json = caddyfile_engine::to_json("host {\n\tdir 123 4.56 true\n}").unwrap();
/// assert_eq!(json, r#"[{"hosts":["host"],"body":[["dir","123","4.56","true"]]}]"#);
/// ```
///
/// # Errors
///
/// Returns `Error::Syntax` for malformed input text.
pub fn to_json(input: &str) -> Result<String, Error> {
    let document = parse(tokenize(input)?)?;
    Ok(document.to_json()?)
}

/// Convert canonical JSON back to Caddyfile text.
///
/// ```
/// let text = caddyfile_engine::from_json(r#"[{"hosts":["foo"],"body":[["root","/bar"]]}]"#).unwrap();
/// assert_eq!(text, "foo {\n\troot /bar\n}");
/// ```
///
/// # Errors
///
/// Returns `Error::Encoding` when the JSON does not follow the
/// canonical schema.
pub fn from_json(input: &str) -> Result<String, Error> {
    let document = Document::from_json(input)?;
    Ok(formatter::format(&document))
}

impl Document {
    /// Serialize to canonical JSON.
    ///
    /// # Errors
    ///
    /// Only fails if `serde_json` itself does.
    pub fn to_json(&self) -> Result<String, EncodingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from canonical JSON, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` for malformed JSON, a schema mismatch,
    /// or a server block with no hosts.
    pub fn from_json(input: &str) -> Result<Self, EncodingError> {
        let mut de = serde_json::Deserializer::from_str(input);
        de.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        if let Some(index) = document.blocks.iter().position(|b| b.hosts.is_empty()) {
            return Err(EncodingError::EmptyHosts { index });
        }
        tracing::debug!(blocks = document.blocks.len(), "decoded JSON document");
        Ok(document)
    }
}

impl Serialize for BodyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + self.args.len() + usize::from(self.nested.is_some());
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.name)?;
        for arg in &self.args {
            seq.serialize_element(arg)?;
        }
        if let Some(nested) = &self.nested {
            seq.serialize_element(nested)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for BodyEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(BodyEntryVisitor)
    }
}

// A string argument or a nested block.
enum Element {
    Arg(String),
    Block(Vec<BodyEntry>),
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ElementVisitor)
    }
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = Element;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string argument or a nested block")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Element::Arg(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Element::Arg(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some(entry) = seq.next_element::<BodyEntry>()? {
            entries.push(entry);
        }
        Ok(Element::Block(entries))
    }
}

struct BodyEntryVisitor;

impl<'de> Visitor<'de> for BodyEntryVisitor {
    type Value = BodyEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of a directive name, string arguments, and an optional nested block")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let name = match seq.next_element::<Element>()? {
            Some(Element::Arg(name)) => name,
            Some(Element::Block(_)) => {
                return Err(de::Error::custom("directive name must be a string"));
            }
            None => return Err(de::Error::invalid_length(0, &self)),
        };

        let mut args = Vec::new();
        let mut nested = None;
        while let Some(element) = seq.next_element::<Element>()? {
            if nested.is_some() {
                return Err(de::Error::custom(
                    "nested block must be the last element of a directive",
                ));
            }
            match element {
                Element::Arg(arg) => args.push(arg),
                Element::Block(block) => nested = Some(block),
            }
        }

        Ok(BodyEntry { name, args, nested })
    }
}
