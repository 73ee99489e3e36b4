//! `redir` directive compiler.
//!
//! ```text
//! redir to
//! redir from to [code]
//! redir to code
//! redir [code] {
//!     to
//!     from to [code]
//! }
//! ```
//!
//! A code given before the block is the default for every line in it
//! that has none of its own; without any code, 301 is used.

use std::any::Any;
use std::fmt;
use std::ops::RangeInclusive;

use crate::directive::{MiddlewareConfig, SetupError};
use crate::dispenser::Dispenser;

/// Directive keyword.
pub const DIRECTIVE: &str = "redir";

/// Code used when none is given.
pub const DEFAULT_CODE: u16 = 301;

const VALID_CODES: RangeInclusive<u16> = 300..=399;

/// One redirect from a path to a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub from_path: String,
    pub to: String,
    pub code: u16,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from_path, self.to, self.code)
    }
}

/// Compiled `redir` configuration; rules in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirect {
    pub rules: Vec<Rule>,
}

impl MiddlewareConfig for Redirect {
    fn directive(&self) -> &'static str {
        DIRECTIVE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Compile every `redir` statement in `d`.
///
/// # Errors
///
/// Returns `SetupError::Syntax` for a wrong argument count,
/// `SetupError::Validation` for a bad status code or a rule that
/// redirects to itself, and `SetupError::Duplicate` when the same
/// rule appears twice.
pub fn setup(d: &mut Dispenser) -> Result<Redirect, SetupError> {
    let mut redirect = Redirect::default();

    while d.next_token() {
        let args = d.remaining_args();
        let level = d.nesting();
        let has_block = d.block_follows();

        // The directive-level default is checked before any block line.
        let default_code = match (has_block, args.as_slice()) {
            (false, _) | (true, []) => None,
            (true, [code]) => Some(parse_code(d, code)?),
            (true, _) => return Err(d.arg_err().into()),
        };

        while d.next_block(level) {
            let mut line = vec![d.val().to_string()];
            line.extend(d.remaining_args());

            let rule = match line.as_slice() {
                [to] => Rule {
                    from_path: "/".to_string(),
                    to: to.clone(),
                    code: default_code.unwrap_or(DEFAULT_CODE),
                },
                [from, to] => Rule {
                    from_path: from.clone(),
                    to: to.clone(),
                    code: default_code.unwrap_or(DEFAULT_CODE),
                },
                [from, to, code] => Rule {
                    from_path: from.clone(),
                    to: to.clone(),
                    code: parse_code(d, code)?,
                },
                _ => return Err(d.arg_err().into()),
            };
            add_rule(d, &mut redirect, rule)?;
        }
        d.expect_closed(level)?;

        if !has_block {
            let rule = inline_rule(d, &args)?;
            add_rule(d, &mut redirect, rule)?;
        }
    }

    tracing::debug!(rules = redirect.rules.len(), "compiled redir");
    Ok(redirect)
}

/// [`setup`] behind the registry's uniform signature.
///
/// # Errors
///
/// Same as [`setup`].
pub fn setup_middleware(d: &mut Dispenser) -> Result<Box<dyn MiddlewareConfig>, SetupError> {
    Ok(Box::new(setup(d)?))
}

fn inline_rule(d: &Dispenser, args: &[String]) -> Result<Rule, SetupError> {
    let rule = match args {
        [to] => Rule {
            from_path: "/".to_string(),
            to: to.clone(),
            code: DEFAULT_CODE,
        },
        [to, code] if code.parse::<u16>().is_ok() => Rule {
            from_path: "/".to_string(),
            to: to.clone(),
            code: parse_code(d, code)?,
        },
        [from, to] => Rule {
            from_path: from.clone(),
            to: to.clone(),
            code: DEFAULT_CODE,
        },
        [from, to, code] => Rule {
            from_path: from.clone(),
            to: to.clone(),
            code: parse_code(d, code)?,
        },
        _ => return Err(d.arg_err().into()),
    };
    Ok(rule)
}

fn parse_code(d: &Dispenser, code: &str) -> Result<u16, SetupError> {
    match code.parse::<u16>() {
        Ok(n) if VALID_CODES.contains(&n) => Ok(n),
        _ => Err(SetupError::validation(
            d,
            format!("invalid redirect code '{code}', must be 300-399"),
        )),
    }
}

fn add_rule(d: &Dispenser, redirect: &mut Redirect, rule: Rule) -> Result<(), SetupError> {
    if rule.from_path == rule.to {
        return Err(SetupError::validation(
            d,
            format!("redirect from '{}' to itself", rule.from_path),
        ));
    }
    if redirect.rules.contains(&rule) {
        return Err(SetupError::duplicate(
            d,
            format!("duplicate redirect rule {rule}"),
        ));
    }
    redirect.rules.push(rule);
    Ok(())
}
