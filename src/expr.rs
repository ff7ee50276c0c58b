//! Expressions used by `{{ ... }}` and by tag arguments.
//!
//! The grammar is deliberately flat: a literal or a variable path, an optional leading `not`,
//! and a chain of argument-less filters. There are no binary operators.
//!
//! ```text
//! filtered := expr ('|' IDENT)*
//! expr     := 'not' expr | STRING | NUMBER | 'true' | 'false' | path
//! path     := IDENT ('.' (IDENT | NUMBER) | '[' (STRING | NUMBER) ']')*
//! ```

use serde_json::Value;
use stencil_syntax::vocab::keywords::{self, KeywordId};
use stencil_syntax::vocab::symbols::{self, SymbolId};
use stencil_syntax::{ParseError, Parser, TokenKind};

use crate::context::{self, ExecutionContext};
use crate::error::RenderError;
use crate::filters::Filter;
use crate::nodes::Evaluator;

/// One step of a variable path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `.name` or `['name']`
    Key(String),
    /// `.0` or `[0]`
    Index(usize),
}

/// An unfiltered expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Path { root: String, segments: Vec<PathSegment> },
    Not(Box<Expr>),
}

impl Expr {
    /// Evaluate against `ctx`.
    ///
    /// ## Errors
    /// In strict mode, an undefined variable or a missing key/index is an error; otherwise it
    /// evaluates to `null`.
    pub fn evaluate(&self, ctx: &ExecutionContext) -> Result<Value, RenderError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Not(inner) => Ok(Value::Bool(!context::is_truthy(&inner.evaluate(ctx)?))),
            Expr::Path { root, segments } => {
                let Some(mut current) = ctx.lookup(root) else {
                    return undefined(ctx, root);
                };
                let mut path = root.clone();
                for segment in segments {
                    let next = match segment {
                        PathSegment::Key(key) => {
                            path.push('.');
                            path.push_str(key);
                            current.get(key.as_str())
                        }
                        PathSegment::Index(index) => {
                            path.push_str(&format!("[{index}]"));
                            current.get(*index)
                        }
                    };
                    match next {
                        Some(value) => current = value,
                        None => return undefined(ctx, &path),
                    }
                }
                Ok(current.clone())
            }
        }
    }
}

fn undefined(ctx: &ExecutionContext, path: &str) -> Result<Value, RenderError> {
    if ctx.strict_variables() {
        Err(ctx.error(format!("'{}' is undefined", path)))
    } else {
        Ok(Value::Null)
    }
}

/// An expression followed by its filter chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredExpr {
    pub expr: Expr,
    pub filters: Vec<Filter>,
}

impl Evaluator for FilteredExpr {
    fn evaluate(&self, ctx: &ExecutionContext) -> Result<Value, RenderError> {
        let mut value = self.expr.evaluate(ctx)?;
        for filter in &self.filters {
            value = filter.apply(value, ctx)?;
        }
        Ok(value)
    }

    fn filter_applied(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f.name() == name)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse `expr ('|' IDENT)*` at the cursor.
pub fn parse_filtered_expression<T: ?Sized>(p: &mut Parser<'_, T>) -> Result<FilteredExpr, ParseError> {
    let expr = parse_expression(p)?;
    let mut filters = Vec::new();

    while p.match_token(TokenKind::Symbol, symbols::as_str(SymbolId::Pipe)).is_some() {
        let Some(name) = p.match_type(TokenKind::Identifier) else {
            return Err(p.error("Filter name must be an identifier.", None));
        };
        let Some(filter) = Filter::from_name(&name.val) else {
            return Err(p.error(format!("Filter '{}' does not exist.", name.val), Some(name)));
        };
        filters.push(filter);
    }

    Ok(FilteredExpr { expr, filters })
}

/// Parse a single unfiltered expression at the cursor.
pub fn parse_expression<T: ?Sized>(p: &mut Parser<'_, T>) -> Result<Expr, ParseError> {
    if p.match_token(TokenKind::Keyword, keywords::as_str(KeywordId::Not)).is_some() {
        return Ok(Expr::Not(Box::new(parse_expression(p)?)));
    }
    if let Some(tok) = p.match_type(TokenKind::String) {
        return Ok(Expr::Literal(Value::String(tok.val.clone())));
    }
    if let Some(tok) = p.peek_type(TokenKind::Number) {
        let value = number_value(&tok.val).ok_or_else(|| p.error("Number is out of range.", Some(tok)))?;
        p.consume();
        return Ok(Expr::Literal(value));
    }
    if p.match_token(TokenKind::Keyword, keywords::as_str(KeywordId::True)).is_some() {
        return Ok(Expr::Literal(Value::Bool(true)));
    }
    if p.match_token(TokenKind::Keyword, keywords::as_str(KeywordId::False)).is_some() {
        return Ok(Expr::Literal(Value::Bool(false)));
    }
    if let Some(root) = p.match_type(TokenKind::Identifier) {
        let segments = parse_path_segments(p)?;
        return Ok(Expr::Path {
            root: root.val.clone(),
            segments,
        });
    }
    Err(p.error("Expected an expression.", None))
}

fn parse_path_segments<T: ?Sized>(p: &mut Parser<'_, T>) -> Result<Vec<PathSegment>, ParseError> {
    let dot = symbols::as_str(SymbolId::Dot);
    let lbracket = symbols::as_str(SymbolId::LBracket);
    let rbracket = symbols::as_str(SymbolId::RBracket);
    let mut segments = Vec::new();

    loop {
        if p.match_token(TokenKind::Symbol, dot).is_some() {
            if let Some(key) = p.match_type(TokenKind::Identifier) {
                segments.push(PathSegment::Key(key.val.clone()));
            } else if let Some(num) = p.peek_type(TokenKind::Number) {
                segments.push(PathSegment::Index(index_value(p, num)?));
                p.consume();
            } else {
                return Err(p.error("Expected a key or index after '.'.", None));
            }
        } else if p.match_token(TokenKind::Symbol, lbracket).is_some() {
            if let Some(key) = p.match_type(TokenKind::String) {
                segments.push(PathSegment::Key(key.val.clone()));
            } else if let Some(num) = p.peek_type(TokenKind::Number) {
                segments.push(PathSegment::Index(index_value(p, num)?));
                p.consume();
            } else {
                return Err(p.error("Subscript must be a string or a number.", None));
            }
            if p.match_token(TokenKind::Symbol, rbracket).is_none() {
                return Err(p.error(format!("'{}' expected", rbracket), None));
            }
        } else {
            return Ok(segments);
        }
    }
}

fn index_value<T: ?Sized>(p: &Parser<'_, T>, tok: &stencil_syntax::Token) -> Result<usize, ParseError> {
    tok.val
        .parse::<usize>()
        .map_err(|_| p.error("Index must be a non-negative integer.", Some(tok)))
}

fn number_value(spelling: &str) -> Option<Value> {
    if spelling.contains('.') {
        spelling
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
    } else {
        spelling.parse::<i64>().ok().map(Value::from)
    }
}
