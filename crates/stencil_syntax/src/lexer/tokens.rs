//! Token types for the stencil lexer.
//!
//! Tokens are plain data: a kind, the literal text and a 1-based source position. Parsers match on
//! `(kind, value)` pairs, with the spellings coming from [`crate::vocab`].

use std::fmt;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Raw template text outside of any delimiter.
    Html,
    /// A reserved word from [`crate::vocab::keywords`].
    Keyword,
    /// Any other name, including tag names.
    Identifier,
    /// A quoted string literal (quotes removed, escapes resolved).
    String,
    /// An integer or decimal literal, kept as written.
    Number,
    /// A delimiter, operator or punctuation from [`crate::vocab::symbols`].
    Symbol,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Html => "HTML",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::Symbol => "Symbol",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values longer than this are abbreviated when a token is displayed.
const DISPLAY_VALUE_LIMIT: usize = 1000;

/// A token with its kind, literal value and 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub val: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, val: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            val: val.into(),
            line,
            col,
        }
    }

    /// Return `true` if this token has the given kind and exact value.
    pub fn is(&self, kind: TokenKind, val: &str) -> bool {
        self.kind == kind && self.val == val
    }
}

impl fmt::Display for Token {
    /// Self-description used inside parse error positions.
    ///
    /// Very long values (typically big HTML runs) are shortened to their first 10 and last 5
    /// characters so a single diagnostic never dumps a whole template.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let char_count = self.val.chars().count();
        if char_count > DISPLAY_VALUE_LIMIT {
            let head: String = self.val.chars().take(10).collect();
            let tail: String = self.val.chars().skip(char_count - 5).collect();
            write!(
                f,
                "<Token Typ={} Val='{}...{}' Line={} Col={}>",
                self.kind, head, tail, self.line, self.col
            )
        } else {
            write!(
                f,
                "<Token Typ={} Val='{}' Line={} Col={}>",
                self.kind, self.val, self.line, self.col
            )
        }
    }
}
