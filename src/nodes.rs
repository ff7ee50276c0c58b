//! Node capabilities and the built-in document nodes.
//!
//! Two independent capabilities:
//! - [`Node`]: renders text against a context (`{{ ... }}`, text runs, tags)
//! - [`Evaluator`]: produces a value and reports which filters it already applied
//!
//! A construct may implement either or both. A node exposes its evaluator side through
//! [`Node::as_evaluator`], so callers can check the capability without downcasting.
//!
//! Nodes are built once at parse time and never mutated, which is what lets a compiled
//! template render concurrently from several threads.

use std::fmt;

use serde_json::Value;
use stencil_syntax::NodeWrapper;

use crate::context::{self, ExecutionContext};
use crate::error::RenderError;
use crate::expr::FilteredExpr;
use crate::filters::Filter;

/// An executable unit of a compiled template.
pub trait Node: fmt::Debug + Send + Sync {
    /// Render this node.
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<String, RenderError>;

    /// The evaluator capability of this node, if it has one.
    fn as_evaluator(&self) -> Option<&dyn Evaluator> {
        None
    }
}

/// A value-producing construct post-processed by a filter chain.
pub trait Evaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, ctx: &ExecutionContext) -> Result<Value, RenderError>;

    /// Whether filter `name` already appears in this construct's chain.
    fn filter_applied(&self, name: &str) -> bool;
}

/// Render `nodes` in order and concatenate their output.
pub fn execute_nodes(nodes: &[Box<dyn Node>], ctx: &mut ExecutionContext) -> Result<String, RenderError> {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&node.execute(ctx)?);
    }
    Ok(out)
}

impl Node for NodeWrapper<Box<dyn Node>> {
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<String, RenderError> {
        execute_nodes(&self.nodes, ctx)
    }
}

// ============================================================================
// Text
// ============================================================================

/// A literal run of template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    text: String,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Node for TextNode {
    fn execute(&self, _ctx: &mut ExecutionContext) -> Result<String, RenderError> {
        Ok(self.text.clone())
    }
}

// ============================================================================
// Variable
// ============================================================================

/// `{{ expr|filter... }}`.
///
/// Output is HTML-escaped when the context has autoescape on, unless the chain already applied
/// `escape` (no double escaping) or `safe`.
#[derive(Debug, Clone)]
pub struct VariableNode {
    expr: FilteredExpr,
}

impl VariableNode {
    pub fn new(expr: FilteredExpr) -> Self {
        Self { expr }
    }
}

impl Node for VariableNode {
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<String, RenderError> {
        let value = self.expr.evaluate(ctx)?;
        let text = context::to_output(&value);
        let already_handled =
            self.filter_applied(Filter::Escape.name()) || self.filter_applied(Filter::Safe.name());
        if ctx.autoescape() && !already_handled {
            Ok(context::html_escape(&text))
        } else {
            Ok(text)
        }
    }

    fn as_evaluator(&self) -> Option<&dyn Evaluator> {
        Some(self)
    }
}

impl Evaluator for VariableNode {
    fn evaluate(&self, ctx: &ExecutionContext) -> Result<Value, RenderError> {
        self.expr.evaluate(ctx)
    }

    fn filter_applied(&self, name: &str) -> bool {
        self.expr.filter_applied(name)
    }
}
