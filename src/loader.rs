//! Compile every server block of a Caddyfile through a [`Registry`].

use crate::directive::{MiddlewareConfig, Registry, registry};
use crate::dispenser::Dispenser;
use crate::error::Error;
use crate::parser::{ParsedBlock, parse_blocks};
use crate::token::Token;

/// Hosts of one server block with the middleware compiled for them.
#[derive(Debug)]
pub struct SiteConfig {
    pub hosts: Vec<String>,
    pub middleware: Vec<Box<dyn MiddlewareConfig>>,
}

/// Parse `input` and compile it with the built-in registry.
///
/// # Errors
///
/// Returns the first syntax or directive error encountered.
pub fn load(input: &str) -> Result<Vec<SiteConfig>, Error> {
    load_with(input, registry())
}

/// Parse `input` and compile it with `registry`.
///
/// Within a block, directives run in registry order; each compiler
/// gets every statement of its directive, in source order, through
/// one dispenser. Directives with no registered compiler are skipped.
///
/// # Errors
///
/// Returns the first syntax or directive error encountered.
pub fn load_with(input: &str, registry: &Registry) -> Result<Vec<SiteConfig>, Error> {
    let mut d = Dispenser::from_input(input)?;
    let blocks = parse_blocks(&mut d)?;

    blocks
        .iter()
        .map(|block| compile_block(d.tokens(), block, registry))
        .collect()
}

fn compile_block(
    tokens: &[Token],
    block: &ParsedBlock,
    registry: &Registry,
) -> Result<SiteConfig, Error> {
    for stmt in &block.statements {
        if !registry.contains(&stmt.name) {
            tracing::warn!(
                directive = %stmt.name,
                line = stmt.line,
                "no compiler registered, skipping directive"
            );
        }
    }

    let mut middleware = Vec::new();
    for name in registry.names() {
        let grouped: Vec<Token> = block
            .statements
            .iter()
            .filter(|stmt| stmt.name == name)
            .flat_map(|stmt| tokens[stmt.tokens.clone()].iter().cloned())
            .collect();
        if grouped.is_empty() {
            continue;
        }
        let Some(setup) = registry.get(name) else {
            continue;
        };

        tracing::debug!(directive = name, hosts = ?block.block.hosts, "compiling directive");
        let mut d = Dispenser::new(grouped);
        middleware.push(setup(&mut d)?);
    }

    Ok(SiteConfig {
        hosts: block.block.hosts.clone(),
        middleware,
    })
}
