#![forbid(unsafe_code)]
//! stencil: a small HTML template engine.
//!
//! Templates are lexed and parsed by `stencil_syntax` into a tree of [`nodes::Node`]s, then
//! rendered against `serde_json` data. Tags (`{% if %}`, `{% for %}`, or your own) are plain
//! functions looked up in a [`tags::TagRegistry`]; block tags find their closing tag through
//! [`stencil_syntax::Parser::wrap_until_tag`].
//!
//! ## Examples
//! ```rust
//! use serde_json::json;
//! use stencil::Environment;
//!
//! let env = Environment::new();
//! let template = env.compile("greeting", "{% for n in names %}Hi {{ n }}! {% endfor %}").unwrap();
//! let out = template.execute_json(&json!({"names": ["Ada", "Bob"]})).unwrap();
//! assert_eq!(out, "Hi Ada! Hi Bob! ");
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod expr;
pub mod filters;
pub mod nodes;
pub mod tags;
pub mod template;

pub use config::TemplateConfig;
pub use context::ExecutionContext;
pub use error::{RegistryError, RenderError, TemplateError};
pub use nodes::{Evaluator, Node};
pub use tags::{TagParser, TagRegistry};
pub use template::{Environment, Template};

pub use stencil_syntax::{LexError, NodeWrapper, ParseError, Token, TokenKind};
