//! Syntax frontend for the stencil template language: tokens, lexer, parser core, diagnostics.
//!
//! This crate is dependency-light and does not know about nodes, values or tags. The `stencil`
//! crate builds the document grammar on top of the primitives exported here.
//!
//! ## Examples
//! ```rust
//! use stencil_syntax::lexer::{self, LexerConfig};
//! use stencil_syntax::parser::Parser;
//!
//! let tokens = lexer::lex("page", "{% if x %}hi{% endif %}", LexerConfig::default()).unwrap();
//! let mut p = Parser::new("page", &tokens);
//! p.consume_n(4);
//! let block = p
//!     .wrap_until_tag(&["endif"], |p| {
//!         let tok = p.current().ok_or_else(|| p.error("Unexpected EOF", None))?;
//!         p.consume();
//!         Ok(tok.val.clone())
//!     })
//!     .unwrap();
//! assert_eq!(block.endtag, "endif");
//! assert_eq!(block.nodes, vec!["hi".to_string()]);
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod vocab;

pub use diagnostics::{LexError, ParseError, Position};
pub use lexer::{LexerConfig, Token, TokenKind};
pub use parser::{Checkpoint, NodeWrapper, Parser};
