use serde::{Deserialize, Serialize};

/// Complete parsed configuration: server blocks in source order.
///
/// Every block applies; later blocks never override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub blocks: Vec<ServerBlock>,
}

/// Hosts sharing one body of directives.
///
/// Hosts are kept in canonical form (see [`crate::normalize_host`])
/// and in the order written, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerBlock {
    pub hosts: Vec<String>,
    pub body: Vec<BodyEntry>,
}

/// One directive line, optionally followed by a nested block.
///
/// `nested: Some(vec![])` is an empty `{ }` block, which is not the
/// same as `None` (no block at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEntry {
    pub name: String,
    pub args: Vec<String>,
    pub nested: Option<Vec<Self>>,
}
