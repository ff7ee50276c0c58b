//! `{% if cond %} ... {% else %} ... {% endif %}`

use stencil_syntax::{NodeWrapper, ParseError, Token};

use crate::context::{self, ExecutionContext};
use crate::document::{self, DocParser};
use crate::error::RenderError;
use crate::expr::{self, FilteredExpr};
use crate::nodes::{Evaluator, Node};

#[derive(Debug)]
pub struct IfNode {
    condition: FilteredExpr,
    then_branch: NodeWrapper<Box<dyn Node>>,
    else_branch: Option<NodeWrapper<Box<dyn Node>>>,
}

impl Node for IfNode {
    fn execute(&self, ctx: &mut ExecutionContext) -> Result<String, RenderError> {
        if context::is_truthy(&self.condition.evaluate(ctx)?) {
            self.then_branch.execute(ctx)
        } else if let Some(else_branch) = &self.else_branch {
            else_branch.execute(ctx)
        } else {
            Ok(String::new())
        }
    }
}

/// Parse an `if` tag. `args` holds the condition; the body follows in `doc`.
pub fn parse_if<'a>(
    doc: &mut DocParser<'a>,
    start: &'a Token,
    args: &mut DocParser<'a>,
) -> Result<Box<dyn Node>, ParseError> {
    super::require_args(args, start)?;
    let condition = expr::parse_filtered_expression(args)?;

    let then_branch = document::parse_block(doc, &["else", "endif"])?;
    let else_branch = if then_branch.ended_with("else") {
        Some(document::parse_block(doc, &["endif"])?)
    } else {
        None
    };

    Ok(Box::new(IfNode {
        condition,
        then_branch,
        else_branch,
    }))
}
