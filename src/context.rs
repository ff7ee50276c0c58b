//! Runtime context for executing compiled templates.
//!
//! Values are plain `serde_json` values. A context is a stack of scopes: the caller's data at the
//! bottom and one scope per active loop iteration above it.

use serde_json::{Map, Value};

use crate::config::TemplateConfig;
use crate::error::RenderError;

/// Per-render state. Each concurrent render owns its own context.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    template_name: String,
    scopes: Vec<Map<String, Value>>,
    autoescape: bool,
    strict_variables: bool,
}

impl ExecutionContext {
    pub fn new(template_name: impl Into<String>, data: Map<String, Value>, config: &TemplateConfig) -> Self {
        Self {
            template_name: template_name.into(),
            scopes: vec![data],
            autoescape: config.autoescape,
            strict_variables: config.strict_variables,
        }
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn autoescape(&self) -> bool {
        self.autoescape
    }

    pub fn strict_variables(&self) -> bool {
        self.strict_variables
    }

    /// Resolve `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind `name` in the innermost scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Map::new());
    }

    /// Pop the innermost scope. The caller's data scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Build a [`RenderError`] for this template.
    pub fn error(&self, message: impl Into<String>) -> RenderError {
        RenderError::new(&self.template_name, message)
    }
}

// ============================================================================
// Value helpers
// ============================================================================

/// Truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text written to the output for `value`. `null` renders as nothing.
pub fn to_output(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Short type name for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escape `& < > " '` for HTML output.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
