use std::ops::Range;

use crate::ast::{BodyEntry, Document, ServerBlock};
use crate::dispenser::Dispenser;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::host::normalize_host;
use crate::token::Token;

/// Parse a token stream into a `Document`.
///
/// # Errors
///
/// Returns `SyntaxError` on unbalanced braces, malformed host lists,
/// or a block where a directive name was expected.
pub fn parse(tokens: Vec<Token>) -> Result<Document, SyntaxError> {
    let mut d = Dispenser::new(tokens);
    let blocks = parse_blocks(&mut d)?;
    Ok(Document {
        blocks: blocks.into_iter().map(|p| p.block).collect(),
    })
}

/// A server block plus the token span of each top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub block: ServerBlock,
    pub statements: Vec<Statement>,
}

/// Token span of one directive statement, nested block included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub line: usize,
    pub tokens: Range<usize>,
}

/// Parse every server block remaining in `d`.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_blocks(d: &mut Dispenser) -> Result<Vec<ParsedBlock>, SyntaxError> {
    Parser { d }.parse()
}

struct Parser<'a> {
    d: &'a mut Dispenser,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Vec<ParsedBlock>, SyntaxError> {
        let mut blocks = Vec::new();

        while self.d.next_token() {
            let block = self.parse_server_block()?;
            tracing::debug!(
                hosts = ?block.block.hosts,
                entries = block.block.body.len(),
                "parsed server block"
            );
            blocks.push(block);
        }

        Ok(blocks)
    }

    fn parse_server_block(&mut self) -> Result<ParsedBlock, SyntaxError> {
        let hosts = self.parse_hosts()?;
        let mut body = Vec::new();
        let mut statements = Vec::new();

        for (entry, tokens) in self.parse_body()? {
            statements.push(Statement {
                name: entry.name.clone(),
                line: self.d.tokens()[tokens.start].line,
                tokens,
            });
            body.push(entry);
        }

        Ok(ParsedBlock {
            block: ServerBlock { hosts, body },
            statements,
        })
    }

    // Cursor on the first host token; leaves it on the opening `{`.
    fn parse_hosts(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut hosts = Vec::new();
        let mut expecting_another = false;

        loop {
            if self.at_open_brace() {
                if expecting_another {
                    return Err(self.d.syntax_err(SyntaxErrorKind::UnexpectedComma));
                }
                if hosts.is_empty() {
                    return Err(self.d.syntax_err(SyntaxErrorKind::MissingHosts));
                }
                return Ok(hosts);
            }
            if self.at_close_brace() {
                return Err(self.d.syntax_err(SyntaxErrorKind::UnexpectedCloseBrace));
            }

            if self.d.is_quoted() {
                hosts.push(normalize_host(self.d.val()));
                expecting_another = false;
            } else {
                let text = self.d.val().to_string();
                split_hosts(&text, &mut hosts, expecting_another)
                    .map_err(|kind| self.d.syntax_err(kind))?;
                expecting_another = text.ends_with(',');
            }

            if self.d.next() {
                continue;
            }
            // A trailing comma carries the list onto the next line.
            if expecting_another && self.d.next_line() {
                continue;
            }
            return Err(self.d.syntax_err(SyntaxErrorKind::ExpectedOpenBrace {
                found: self.d.peek().map(|t| t.text.clone()),
            }));
        }
    }

    // Cursor on `{`; consumes through the matching `}`.
    fn parse_body(&mut self) -> Result<Vec<(BodyEntry, Range<usize>)>, SyntaxError> {
        let mut entries = Vec::new();

        loop {
            if !self.d.next_token() {
                return Err(self.d.syntax_err(SyntaxErrorKind::ExpectedCloseBrace));
            }
            if self.at_close_brace() {
                return Ok(entries);
            }
            if self.at_open_brace() {
                return Err(self.d.syntax_err(SyntaxErrorKind::UnexpectedOpenBrace));
            }

            let start = self.d.cursor().unwrap_or_default();
            let entry = self.parse_entry()?;
            let end = self.d.cursor().map_or(start, |i| i + 1);
            entries.push((entry, start..end));
        }
    }

    // Cursor on the directive name.
    fn parse_entry(&mut self) -> Result<BodyEntry, SyntaxError> {
        let name = self.d.val().to_string();
        let mut args = Vec::new();
        let mut nested = None;

        while self.d.next() {
            if self.at_open_brace() {
                let body = self.parse_body()?;
                nested = Some(body.into_iter().map(|(entry, _)| entry).collect());
                break;
            }
            args.push(self.d.val().to_string());
        }

        Ok(BodyEntry { name, args, nested })
    }

    fn at_open_brace(&self) -> bool {
        self.d.current().is_some_and(Token::is_open_brace)
    }

    fn at_close_brace(&self) -> bool {
        self.d.current().is_some_and(Token::is_close_brace)
    }
}

// Split one unquoted token of a host list on commas.
//
// A comma may trail a host (`a,`) or lead the next one (`,b`) but
// never both, and a list never starts with one.
fn split_hosts(
    text: &str,
    hosts: &mut Vec<String>,
    expecting_another: bool,
) -> Result<(), SyntaxErrorKind> {
    let parts: Vec<&str> = text.split(',').collect();
    let last = parts.len() - 1;

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            let trailing = i == last && i > 0;
            let leading = i == 0 && last > 0 && !expecting_another && !hosts.is_empty();
            if trailing || leading {
                continue;
            }
            return Err(SyntaxErrorKind::UnexpectedComma);
        }
        hosts.push(normalize_host(part));
    }

    Ok(())
}
