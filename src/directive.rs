//! Contract between the engine and directive compilers.
//!
//! A compiler receives a [`Dispenser`] holding every statement of its
//! directive within one server block, steps onto each statement with
//! [`Dispenser::next_token`], reads arguments with
//! [`Dispenser::next_arg`] / [`Dispenser::remaining_args`] and block
//! lines with [`Dispenser::next_block`], and returns its middleware
//! configuration. It must not keep the dispenser past the call.

use std::any::Any;
use std::fmt;
use std::sync::LazyLock;

use crate::dispenser::Dispenser;
use crate::error::SyntaxError;
use crate::redirect;

/// Error returned by a directive compiler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Missing or surplus arguments, or a misplaced block.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// A value outside the directive's domain.
    #[error("{message} at line {line}")]
    Validation { message: String, line: usize },
    /// A rule identical to one already compiled.
    #[error("{message} at line {line}")]
    Duplicate { message: String, line: usize },
}

impl SetupError {
    /// Validation error at the dispenser's current line.
    #[must_use]
    pub fn validation(d: &Dispenser, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            line: d.line(),
        }
    }

    /// Duplicate error at the dispenser's current line.
    #[must_use]
    pub fn duplicate(d: &Dispenser, message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
            line: d.line(),
        }
    }
}

/// Compiled configuration handed to the HTTP pipeline.
pub trait MiddlewareConfig: fmt::Debug + Send + Sync {
    /// Name of the directive that produced this configuration.
    fn directive(&self) -> &'static str;

    /// Downcasting hook for the concrete configuration type.
    fn as_any(&self) -> &dyn Any;
}

/// Signature every directive compiler implements.
pub type SetupFn = fn(&mut Dispenser) -> Result<Box<dyn MiddlewareConfig>, SetupError>;

/// Ordered table of directive compilers.
///
/// Order is execution order when a server block is compiled.
#[derive(Debug, Clone)]
pub struct Registry {
    directives: Vec<(&'static str, SetupFn)>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// Register a compiler after all existing ones.
    ///
    /// Registering a name twice replaces the earlier compiler but
    /// keeps its position.
    pub fn register(&mut self, name: &'static str, setup: SetupFn) {
        tracing::debug!(directive = name, "registering directive");
        if let Some(slot) = self.directives.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = setup;
        } else {
            self.directives.push((name, setup));
        }
    }

    /// Look up a compiler by directive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SetupFn> {
        self.directives
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, setup)| *setup)
    }

    /// Whether a compiler is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Directive names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.directives.iter().map(|(name, _)| *name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::new();
    registry.register(redirect::DIRECTIVE, redirect::setup_middleware);
    registry
});

/// The built-in registry of directive compilers.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}
