//! Diagnostics for lexing and parsing templates.
//!
//! Both error types render to a single positioned line, e.g.
//! `[Parse Error in page.html | Line 3 Col 9 (<Token Typ=Identifier Val='endif' Line=3 Col=9>)] No arguments allowed for tag 'endif'`,
//! and keep the structured parts so callers (tests, the CLI) can inspect them without re-parsing
//! the message.

use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::Token;

/// Source position attached to a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    /// Display form of the offending token.
    pub token: String,
}

impl Position {
    /// Capture the position of `token`.
    pub fn of(token: &Token) -> Self {
        Self {
            line: token.line,
            col: token.col,
            token: token.to_string(),
        }
    }
}

/// A failed parse. Compilation aborts on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("[Parse Error in {name}{}] {message}", position_suffix(.position))]
#[diagnostic(code(stencil::parse))]
pub struct ParseError {
    /// Logical name of the parsed unit (usually the template name).
    pub name: String,
    /// `None` only when the token sequence was empty.
    pub position: Option<Position>,
    pub message: String,
}

impl ParseError {
    pub fn new(name: impl Into<String>, position: Option<Position>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            message: message.into(),
        }
    }

    /// Line of the offending token, if any.
    pub fn line(&self) -> Option<usize> {
        self.position.as_ref().map(|p| p.line)
    }

    /// Column of the offending token, if any.
    pub fn col(&self) -> Option<usize> {
        self.position.as_ref().map(|p| p.col)
    }
}

fn position_suffix(position: &Option<Position>) -> String {
    match position {
        Some(pos) => format!(" | Line {} Col {} ({})", pos.line, pos.col, pos.token),
        None => String::new(),
    }
}

/// A failure to tokenize template source.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("[Lexer Error in {name} | Line {line} Col {col}] {message}")]
#[diagnostic(code(stencil::lex))]
pub struct LexError {
    pub name: String,
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl LexError {
    pub fn new(name: impl Into<String>, line: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line,
            col,
            message: message.into(),
        }
    }
}
