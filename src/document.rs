//! Document-level dispatch: turns the token stream into nodes.
//!
//! [`parse_doc_element`] recognizes exactly one unit at the cursor (text, `{{ ... }}` or
//! `{% tag ... %}`) and hands tags to the handler registered under their name. Block tags call
//! [`parse_block`], which runs the block scanner with this dispatcher plugged in; that mutual
//! recursion is how nested blocks resolve their own closers.

use stencil_syntax::vocab::symbols::{TAG_CLOSE, TAG_OPEN, VAR_CLOSE, VAR_OPEN};
use stencil_syntax::{NodeWrapper, ParseError, Parser, TokenKind};

use crate::expr;
use crate::nodes::{Node, TextNode, VariableNode};
use crate::template::Template;

/// Parser over a template document, carrying the template as back-reference.
pub type DocParser<'a> = Parser<'a, Template>;

/// Parse elements until the token stream is exhausted.
pub fn parse_document(p: &mut DocParser<'_>) -> Result<Vec<Box<dyn Node>>, ParseError> {
    let mut nodes = Vec::new();
    while !p.is_at_end() {
        nodes.push(parse_doc_element(p)?);
    }
    Ok(nodes)
}

/// Parse a block body until one of `closers`; see [`Parser::wrap_until_tag`].
pub fn parse_block(p: &mut DocParser<'_>, closers: &[&str]) -> Result<NodeWrapper<Box<dyn Node>>, ParseError> {
    p.wrap_until_tag(closers, parse_doc_element)
}

/// Parse exactly one document element at the cursor.
pub fn parse_doc_element(p: &mut DocParser<'_>) -> Result<Box<dyn Node>, ParseError> {
    if let Some(text) = p.match_type(TokenKind::Html) {
        return Ok(Box::new(TextNode::new(text.val.as_str())));
    }
    if p.peek(TokenKind::Symbol, VAR_OPEN).is_some() {
        return parse_variable_element(p);
    }
    if p.peek(TokenKind::Symbol, TAG_OPEN).is_some() {
        return parse_tag_element(p);
    }
    if p.is_at_end() {
        return Err(p.error("Unexpected EOF.", None));
    }
    Err(p.error("Unexpected token.", None))
}

fn parse_variable_element(p: &mut DocParser<'_>) -> Result<Box<dyn Node>, ParseError> {
    p.consume();
    let expr = expr::parse_filtered_expression(p)?;
    if p.match_token(TokenKind::Symbol, VAR_CLOSE).is_none() {
        return Err(p.error(format!("'{}' expected", VAR_CLOSE), None));
    }
    Ok(Box::new(VariableNode::new(expr)))
}

fn parse_tag_element(p: &mut DocParser<'_>) -> Result<Box<dyn Node>, ParseError> {
    let open = p.current();
    p.consume();

    let Some(name) = p.match_type(TokenKind::Identifier) else {
        if p.is_at_end() {
            return Err(p.error(format!("Unexpected EOF, expected tag name after '{}'.", TAG_OPEN), open));
        }
        return Err(p.error("Tag name must be an identifier.", None));
    };

    let Some(handler) = p.template().and_then(|t| t.tags().get(&name.val)) else {
        return Err(p.error(format!("Tag '{}' does not exist", name.val), Some(name)));
    };

    let args_start = p.index();
    while p.peek(TokenKind::Symbol, TAG_CLOSE).is_none() {
        if p.is_at_end() {
            return Err(p.error(
                format!("Tag '{}' is not closed, '{}' expected.", name.val, TAG_CLOSE),
                Some(name),
            ));
        }
        p.consume();
    }
    let args_tokens = &p.tokens()[args_start..p.index()];
    p.consume();

    tracing::trace!(tag = %name.val, line = name.line, args = args_tokens.len(), "dispatching tag");
    let mut args = p.sub_parser(args_tokens);
    let node = handler(p, name, &mut args)?;
    if !args.is_at_end() {
        return Err(args.error(format!("Malformed '{}'-tag arguments.", name.val), None));
    }
    Ok(node)
}
