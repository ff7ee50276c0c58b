//! Tag registry and built-in tags.
//!
//! A tag is a plain function ([`TagParser`]) registered under a name. When the dispatcher meets
//! `{% name args... %}` it consumes the whole tag, then calls the handler with:
//! - the document parser, positioned right after `%}` (block tags scan their body from here)
//! - the tag-name token (for positioned errors)
//! - a sub-parser over just the argument tokens, which the handler must consume completely
//!
//! Adding a tag never touches the parser: register a function.

mod for_tag;
mod if_tag;

use std::collections::HashMap;

use stencil_syntax::{ParseError, Token};

use crate::document::DocParser;
use crate::error::RegistryError;
use crate::nodes::Node;

pub use for_tag::{ForNode, parse_for};
pub use if_tag::{IfNode, parse_if};

/// Parse function for one tag kind.
pub type TagParser =
    for<'a> fn(doc: &mut DocParser<'a>, start: &'a Token, args: &mut DocParser<'a>) -> Result<Box<dyn Node>, ParseError>;

/// Map from tag name to its parse function.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    tags: HashMap<String, TagParser>,
}

impl TagRegistry {
    /// An empty registry (no tags at all, not even `if`/`for`).
    pub fn empty() -> Self {
        Self { tags: HashMap::new() }
    }

    /// A registry with the built-in tags.
    pub fn builtin() -> Self {
        let mut tags: HashMap<String, TagParser> = HashMap::new();
        tags.insert("if".to_string(), parse_if);
        tags.insert("for".to_string(), parse_for);
        Self { tags }
    }

    /// Register a new tag.
    ///
    /// ## Errors
    /// [`RegistryError::Duplicate`] if `name` is taken.
    pub fn register(&mut self, name: &str, parser: TagParser) -> Result<(), RegistryError> {
        if self.tags.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.tags.insert(name.to_string(), parser);
        Ok(())
    }

    /// Replace the handler of an existing tag.
    ///
    /// ## Errors
    /// [`RegistryError::Missing`] if `name` was never registered.
    pub fn replace(&mut self, name: &str, parser: TagParser) -> Result<(), RegistryError> {
        match self.tags.get_mut(name) {
            Some(slot) => {
                *slot = parser;
                Ok(())
            }
            None => Err(RegistryError::Missing(name.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<TagParser> {
        self.tags.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Fail at the tag name when a tag that needs arguments got none.
pub(crate) fn require_args(args: &DocParser<'_>, start: &Token) -> Result<(), ParseError> {
    if args.is_at_end() {
        return Err(args.error(format!("Tag '{}' requires arguments.", start.val), Some(start)));
    }
    Ok(())
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
