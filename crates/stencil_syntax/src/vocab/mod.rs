//! Canonical vocabulary for the stencil template language.
//!
//! The lexer and the tag parsers never hard-code spellings for delimiters, symbols or reserved
//! words; they go through these registries instead.
//!
//! ## Notes
//! - Registries are `const` tables and are pure: no IO, no global mutable state.
//! - Tag names (`if`, `for`, `endif`, ...) are deliberately **not** keywords: they are lexed as
//!   identifiers so new tags can be registered without touching the lexer.

pub mod keywords;
pub mod symbols;
