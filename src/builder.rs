use crate::ast::{BodyEntry, Document, ServerBlock};
use crate::host::normalize_host;

impl Document {
    /// Create a new empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Add a server block.
    #[must_use]
    pub fn block(mut self, block: ServerBlock) -> Self {
        self.blocks.push(block);
        self
    }
}

impl ServerBlock {
    /// Create a new server block with one host.
    ///
    /// The host goes through [`normalize_host`], just as it would
    /// when parsed from text.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self {
            hosts: vec![normalize_host(host)],
            body: Vec::new(),
        }
    }

    /// Add another host to this server block.
    #[must_use]
    pub fn host(mut self, host: &str) -> Self {
        self.hosts.push(normalize_host(host));
        self
    }

    /// Add a body entry.
    #[must_use]
    pub fn entry(mut self, entry: BodyEntry) -> Self {
        self.body.push(entry);
        self
    }

    /// Add a `redir` line.
    #[must_use]
    pub fn redir(self, from: &str, to: &str, code: u16) -> Self {
        self.entry(
            BodyEntry::new("redir")
                .arg(from)
                .arg(to)
                .arg(&code.to_string()),
        )
    }
}

impl BodyEntry {
    /// Create a new entry with the given directive name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
            nested: None,
        }
    }

    /// Add an argument.
    #[must_use]
    pub fn arg(mut self, value: &str) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Add several arguments.
    #[must_use]
    pub fn args(mut self, values: &[&str]) -> Self {
        self.args.extend(values.iter().map(ToString::to_string));
        self
    }

    /// Set the nested block. An empty vector is an empty `{ }` block.
    #[must_use]
    pub fn block(mut self, entries: Vec<Self>) -> Self {
        self.nested = Some(entries);
        self
    }
}
