//! Error types for compiling and rendering templates.
//!
//! Lexing and parsing errors come from `stencil_syntax` and are wrapped unchanged; the
//! positioned message produced there is what the user sees.

use miette::Diagnostic;
use thiserror::Error;

pub use stencil_syntax::{LexError, ParseError};

/// Failure while executing a compiled template against a context.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("[Execution Error in {template}] {message}")]
#[diagnostic(code(stencil::render))]
pub struct RenderError {
    pub template: String,
    pub message: String,
}

impl RenderError {
    pub fn new(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            message: message.into(),
        }
    }
}

/// Any failure surfaced by [`crate::Environment`] or [`crate::Template`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TemplateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

/// Failure to change the tag registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tag '{0}' is already registered")]
    Duplicate(String),

    #[error("tag '{0}' is not registered")]
    Missing(String),
}
