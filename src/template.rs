//! Compilation entry points: [`Environment`] and compiled [`Template`]s.
//!
//! ## Notes
//! - Compilation is single-threaded and aborts on the first error.
//! - A compiled [`Template`] is immutable and `Send + Sync`; each [`Template::execute`] call gets
//!   its own [`ExecutionContext`], so one template can render from many threads at once.

use std::sync::Arc;

use serde_json::{Map, Value};
use stencil_syntax::{Parser, lexer};

use crate::config::TemplateConfig;
use crate::context::ExecutionContext;
use crate::document;
use crate::error::{RegistryError, RenderError, TemplateError};
use crate::nodes::{self, Node};
use crate::tags::{TagParser, TagRegistry};

/// Compiles templates with a shared configuration and tag registry.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    config: TemplateConfig,
    tags: Arc<TagRegistry>,
}

impl Environment {
    /// An environment with default settings and the built-in tags.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TemplateConfig) -> Self {
        Self {
            config,
            tags: Arc::new(TagRegistry::builtin()),
        }
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Register a custom tag. Templates compiled earlier keep the registry they were built with.
    ///
    /// ## Errors
    /// [`RegistryError::Duplicate`] if `name` is already a tag.
    pub fn register_tag(&mut self, name: &str, parser: TagParser) -> Result<(), RegistryError> {
        Arc::make_mut(&mut self.tags).register(name, parser)
    }

    /// Swap the parse function of an existing tag.
    ///
    /// ## Errors
    /// [`RegistryError::Missing`] if `name` is not a tag.
    pub fn replace_tag(&mut self, name: &str, parser: TagParser) -> Result<(), RegistryError> {
        Arc::make_mut(&mut self.tags).replace(name, parser)
    }

    /// Lex and parse `source` into a [`Template`].
    ///
    /// ## Parameters
    /// - `name`: template name used in every diagnostic.
    /// - `source`: template text.
    ///
    /// ## Errors
    /// [`TemplateError::Lex`] or [`TemplateError::Parse`]; the first error wins.
    #[tracing::instrument(skip_all, fields(name = name))]
    pub fn compile(&self, name: &str, source: &str) -> Result<Template, TemplateError> {
        let tokens = lexer::lex(name, source, self.config.lexer)?;
        tracing::debug!(tokens = tokens.len(), "lexed template");

        let mut template = Template {
            name: name.to_string(),
            config: self.config.clone(),
            tags: Arc::clone(&self.tags),
            nodes: Vec::new(),
        };
        let nodes = {
            let mut parser = Parser::with_template(&template.name, &tokens, &template);
            document::parse_document(&mut parser)?
        };
        tracing::debug!(nodes = nodes.len(), "parsed template");
        template.nodes = nodes;
        Ok(template)
    }
}

/// A compiled template.
#[derive(Debug)]
pub struct Template {
    name: String,
    config: TemplateConfig,
    tags: Arc<TagRegistry>,
    nodes: Vec<Box<dyn Node>>,
}

impl Template {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// The tag registry this template was compiled with.
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Top-level nodes, in document order.
    pub fn nodes(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    /// Render with `data` as the outermost scope.
    ///
    /// ## Errors
    /// [`TemplateError::Render`] on the first failing node.
    #[tracing::instrument(skip_all, fields(name = %self.name))]
    pub fn execute(&self, data: &Map<String, Value>) -> Result<String, TemplateError> {
        let mut ctx = ExecutionContext::new(&self.name, data.clone(), &self.config);
        Ok(nodes::execute_nodes(&self.nodes, &mut ctx)?)
    }

    /// Like [`Template::execute`], for data that arrives as an arbitrary JSON value.
    ///
    /// ## Errors
    /// A [`TemplateError::Render`] if `data` is neither an object nor `null`.
    pub fn execute_json(&self, data: &Value) -> Result<String, TemplateError> {
        match data {
            Value::Object(map) => self.execute(map),
            Value::Null => self.execute(&Map::new()),
            other => Err(RenderError::new(
                &self.name,
                format!("Template data must be an object, got {}", crate::context::type_name(other)),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(source: &str, data: Value) -> String {
        Environment::new()
            .compile("test", source)
            .unwrap()
            .execute_json(&data)
            .unwrap()
    }

    #[test]
    fn test_text_and_variables() {
        assert_eq!(render("Hello, {{ name }}!", json!({"name": "Ada"})), "Hello, Ada!");
        assert_eq!(render("{{ missing }}|", json!({})), "|");
    }

    #[test]
    fn test_template_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Template>();
        assert_send_sync::<Environment>();
    }

    #[test]
    fn test_execute_json_rejects_non_objects() {
        let template = Environment::new().compile("page", "x").unwrap();
        let err = template.execute_json(&json!([1])).unwrap_err();
        assert_eq!(err.to_string(), "[Execution Error in page] Template data must be an object, got array");
        assert_eq!(template.execute_json(&Value::Null).unwrap(), "x");
    }

    #[test]
    fn test_registered_tags_apply_to_later_compiles_only() {
        let mut env = Environment::new();
        let before = env.compile("a", "").unwrap();
        env.register_tag("unless", crate::tags::parse_if).unwrap();
        assert!(!before.tags().contains("unless"));
        assert!(env.compile("b", "{% unless x %}y{% endif %}").is_ok());
    }
}
