//! Reserved words usable inside tags and variables.
//!
//! ## Examples
//! ```rust
//! use stencil_syntax::vocab::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("in"), Some(KeywordId::In));
//! assert_eq!(keywords::from_str("endif"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    In,
    And,
    Or,
    Not,
    True,
    False,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    /// Literal keywords evaluate to a value on their own (`true`, `false`).
    pub is_literal: bool,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::In, "in", false),
    info(KeywordId::And, "and", false),
    info(KeywordId::Or, "or", false),
    info(KeywordId::Not, "not", false),
    info(KeywordId::True, "true", true),
    info(KeywordId::False, "false", true),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: keyword registry covers every KeywordId")
}

/// Lookup by spelling. Matching is case-sensitive.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str, is_literal: bool) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        is_literal,
    }
}
