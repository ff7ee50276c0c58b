//! `{% for x in xs %} ... {% empty %} ... {% endfor %}`
//!
//! Inside the body a `loop` object is bound with `index` (1-based), `index0`, `first`, `last`
//! and `length`. Each iteration runs in its own scope, so loop variables never leak out.

use serde_json::{Value, json};
use stencil_syntax::vocab::keywords::{self, KeywordId};
use stencil_syntax::vocab::symbols::{self, SymbolId};
use stencil_syntax::{NodeWrapper, ParseError, Token, TokenKind};

use crate::context::{self, ExecutionContext};
use crate::document::{self, DocParser};
use crate::error::RenderError;
use crate::expr::{self, FilteredExpr};
use crate::nodes::{Evaluator, Node};

#[derive(Debug)]
pub struct ForNode {
    /// One name, or two for `k, v` unpacking.
    targets: Vec<String>,
    iterable: FilteredExpr,
    body: NodeWrapper<Box<dyn Node>>,
    empty_branch: Option<NodeWrapper<Box<dyn Node>>>,
}

impl ForNode {
    /// Pair each item with the values bound to the loop targets.
    fn bindings(&self, value: Value, ctx: &ExecutionContext) -> Result<Vec<Vec<Value>>, RenderError> {
        let pairs = self.targets.len() == 2;
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) if pairs => Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, item)| vec![Value::from(i), item])
                .collect()),
            Value::Array(items) => Ok(items.into_iter().map(|item| vec![item]).collect()),
            Value::Object(map) if pairs => Ok(map
                .into_iter()
                .map(|(k, v)| vec![Value::String(k), v])
                .collect()),
            Value::Object(map) => Ok(map.into_iter().map(|(k, _)| vec![Value::String(k)]).collect()),
            other => Err(ctx.error(format!("Cannot iterate over {}", context::type_name(&other)))),
        }
    }
}

impl Node for ForNode {
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<String, RenderError> {
        let value = self.iterable.evaluate(ctx)?;
        let rows = self.bindings(value, ctx)?;

        if rows.is_empty() {
            return match &self.empty_branch {
                Some(branch) => branch.execute(ctx),
                None => Ok(String::new()),
            };
        }

        let length = rows.len();
        let mut out = String::new();
        for (i, row) in rows.into_iter().enumerate() {
            ctx.push_scope();
            for (target, value) in self.targets.iter().zip(row) {
                ctx.set(target.as_str(), value);
            }
            ctx.set(
                "loop",
                json!({
                    "index": i + 1,
                    "index0": i,
                    "first": i == 0,
                    "last": i + 1 == length,
                    "length": length,
                }),
            );
            let rendered = self.body.execute(ctx);
            ctx.pop_scope();
            out.push_str(&rendered?);
        }
        Ok(out)
    }
}

/// Parse a `for` tag: `NAME (',' NAME)? 'in' expr`.
pub fn parse_for<'a>(
    doc: &mut DocParser<'a>,
    start: &'a Token,
    args: &mut DocParser<'a>,
) -> Result<Box<dyn Node>, ParseError> {
    super::require_args(args, start)?;
    let mut targets = Vec::new();
    let Some(first) = args.match_type(TokenKind::Identifier) else {
        return Err(args.error("Expected a loop variable name.", None));
    };
    targets.push(first.val.clone());
    if args.match_token(TokenKind::Symbol, symbols::as_str(SymbolId::Comma)).is_some() {
        let Some(second) = args.match_type(TokenKind::Identifier) else {
            return Err(args.error("Expected a second loop variable name after ','.", None));
        };
        targets.push(second.val.clone());
    }

    let in_kw = keywords::as_str(KeywordId::In);
    if args.match_token(TokenKind::Keyword, in_kw).is_none() {
        return Err(args.error(format!("'{}' expected", in_kw), None));
    }
    let iterable = expr::parse_filtered_expression(args)?;

    let body = document::parse_block(doc, &["empty", "endfor"])?;
    let empty_branch = if body.ended_with("empty") {
        Some(document::parse_block(doc, &["endfor"])?)
    } else {
        None
    };

    Ok(Box::new(ForNode {
        targets,
        iterable,
        body,
        empty_branch,
    }))
}
