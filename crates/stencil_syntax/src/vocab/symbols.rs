//! Symbol vocabulary: delimiters, operators and punctuation that may appear in a template.
//!
//! ## Examples
//! ```rust
//! use stencil_syntax::vocab::symbols::{self, SymbolId};
//!
//! assert_eq!(symbols::from_str("{%"), Some(SymbolId::TagOpen));
//! assert_eq!(symbols::as_str(SymbolId::Pipe), "|");
//! ```

/// Opens a tag: `{%`.
pub const TAG_OPEN: &str = "{%";
/// Closes a tag: `%}`.
pub const TAG_CLOSE: &str = "%}";
/// Opens a variable interpolation: `{{`.
pub const VAR_OPEN: &str = "{{";
/// Closes a variable interpolation: `}}`.
pub const VAR_CLOSE: &str = "}}";
/// Opens a comment: `{#`. Comments never reach the token stream.
pub const COMMENT_OPEN: &str = "{#";
/// Closes a comment: `#}`.
pub const COMMENT_CLOSE: &str = "#}";

/// Broad syntactic grouping for symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    /// Template delimiters (`{%`, `%}`, `{{`, `}}`).
    Delimiter,
    /// Comparison and arithmetic operators.
    Operator,
    /// Brackets, separators and access markers.
    Punctuation,
}

/// Stable identifier for symbol tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    // Delimiters
    TagOpen,
    TagClose,
    VarOpen,
    VarClose,

    // Operators
    EqEq,
    NotEq,
    LtEq,
    GtEq,
    Lt,
    Gt,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Pipe,
    Colon,
}

/// Metadata for a symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo {
    pub id: SymbolId,
    pub canonical: &'static str,
    pub category: SymbolCategory,
}

/// Registry of all symbols.
pub const SYMBOLS: &[SymbolInfo] = &[
    info(SymbolId::TagOpen, TAG_OPEN, SymbolCategory::Delimiter),
    info(SymbolId::TagClose, TAG_CLOSE, SymbolCategory::Delimiter),
    info(SymbolId::VarOpen, VAR_OPEN, SymbolCategory::Delimiter),
    info(SymbolId::VarClose, VAR_CLOSE, SymbolCategory::Delimiter),
    info(SymbolId::EqEq, "==", SymbolCategory::Operator),
    info(SymbolId::NotEq, "!=", SymbolCategory::Operator),
    info(SymbolId::LtEq, "<=", SymbolCategory::Operator),
    info(SymbolId::GtEq, ">=", SymbolCategory::Operator),
    info(SymbolId::Lt, "<", SymbolCategory::Operator),
    info(SymbolId::Gt, ">", SymbolCategory::Operator),
    info(SymbolId::Bang, "!", SymbolCategory::Operator),
    info(SymbolId::Plus, "+", SymbolCategory::Operator),
    info(SymbolId::Minus, "-", SymbolCategory::Operator),
    info(SymbolId::Star, "*", SymbolCategory::Operator),
    info(SymbolId::Slash, "/", SymbolCategory::Operator),
    info(SymbolId::Percent, "%", SymbolCategory::Operator),
    info(SymbolId::LParen, "(", SymbolCategory::Punctuation),
    info(SymbolId::RParen, ")", SymbolCategory::Punctuation),
    info(SymbolId::LBracket, "[", SymbolCategory::Punctuation),
    info(SymbolId::RBracket, "]", SymbolCategory::Punctuation),
    info(SymbolId::Comma, ",", SymbolCategory::Punctuation),
    info(SymbolId::Dot, ".", SymbolCategory::Punctuation),
    info(SymbolId::Pipe, "|", SymbolCategory::Punctuation),
    info(SymbolId::Colon, ":", SymbolCategory::Punctuation),
];

/// Return the canonical spelling for a symbol.
pub fn as_str(id: SymbolId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a symbol.
pub fn category(id: SymbolId) -> SymbolCategory {
    info_for(id).category
}

/// Return the full metadata entry for a symbol.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: SymbolId) -> &'static SymbolInfo {
    SYMBOLS
        .iter()
        .find(|s| s.id == id)
        .expect("INVARIANT: symbol registry covers every SymbolId")
}

/// Resolve a symbol spelling to its identifier (case-sensitive, exact match).
pub fn from_str(s: &str) -> Option<SymbolId> {
    SYMBOLS.iter().find(|info| info.canonical == s).map(|info| info.id)
}

/// Return the longest registered symbol that `input` starts with.
///
/// The lexer uses this for maximal munch, so `<=` wins over `<` and `%}` wins over `%`.
pub fn longest_prefix(input: &str) -> Option<&'static SymbolInfo> {
    SYMBOLS
        .iter()
        .filter(|info| input.starts_with(info.canonical))
        .max_by_key(|info| info.canonical.len())
}

const fn info(id: SymbolId, canonical: &'static str, category: SymbolCategory) -> SymbolInfo {
    SymbolInfo { id, canonical, category }
}
