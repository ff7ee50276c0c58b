//! Parser core for stencil templates.
//!
//! The parser in this crate does not know what a node is. It provides a cursor over an immutable
//! token sequence, the lookahead/consume primitives tag handlers build their sub-grammars from,
//! the block scanner ([`Parser::wrap_until_tag`]) and the single positioned-error constructor
//! ([`Parser::error`]). The node tree and the document dispatcher live in the `stencil` crate and
//! plug in as closures.
//!
//! ## Examples
//!
//! ```rust
//! use stencil_syntax::lexer::{self, LexerConfig, TokenKind};
//! use stencil_syntax::parser::Parser;
//!
//! let tokens = lexer::lex("page", "{% if x %}hello{% endif %}", LexerConfig::default()).unwrap();
//! let mut p = Parser::new("page", &tokens);
//! assert!(p.match_token(TokenKind::Symbol, "{%").is_some());
//! assert!(p.peek_n(2, TokenKind::Symbol, "%}").is_some());
//! ```

use crate::diagnostics::{ParseError, Position};
use crate::lexer::{Token, TokenKind};
use crate::vocab::symbols::{TAG_CLOSE, TAG_OPEN};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/wrap.rs");
include!("parser/errors.rs");
include!("parser/tests.rs");
