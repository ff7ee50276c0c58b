#[cfg(test)]
/// Parser core unit tests.
///
/// The element parser used here is a toy: it knows `{% if ... %}` (recursing into the block
/// scanner) and otherwise swallows one token per element.
mod tests {
    use super::*;
    use crate::lexer::{self, LexerConfig};

    #[derive(Debug, Clone, PartialEq)]
    enum Toy {
        Text(String),
        If(Vec<Toy>),
        Other(String),
    }

    fn tokens(source: &str) -> Vec<Token> {
        lexer::lex("test", source, LexerConfig::default()).unwrap()
    }

    fn toy_element(p: &mut Parser<'_>) -> Result<Toy, ParseError> {
        if let Some(text) = p.match_type(TokenKind::Html) {
            return Ok(Toy::Text(text.val.clone()));
        }
        if p.peek(TokenKind::Symbol, "{%").is_some() && p.peek_n(1, TokenKind::Identifier, "if").is_some() {
            p.consume_n(2);
            while p.match_token(TokenKind::Symbol, "%}").is_none() {
                if p.is_at_end() {
                    return Err(p.error("'%}' expected", None));
                }
                p.consume();
            }
            let block = p.wrap_until_tag(&["endif"], toy_element)?;
            return Ok(Toy::If(block.nodes));
        }
        let tok = p.current().ok_or_else(|| p.error("Unexpected EOF", None))?;
        p.consume();
        Ok(Toy::Other(tok.val.clone()))
    }

    // ========================================================================
    // Cursor primitives
    // ========================================================================

    #[test]
    fn test_get_is_bounds_safe() {
        let toks = tokens("{{ a }}");
        let p = Parser::new("test", &toks);
        assert_eq!(p.count(), 3);
        assert!(p.get(2).is_some());
        assert!(p.get(3).is_none());
        assert!(p.get(usize::MAX).is_none());
    }

    #[test]
    fn test_peek_family_never_moves_cursor() {
        let toks = tokens("{% if x %}");
        let p = Parser::new("test", &toks);
        assert!(p.peek_type(TokenKind::Symbol).is_some());
        assert!(p.peek(TokenKind::Symbol, "{%").is_some());
        assert!(p.peek(TokenKind::Symbol, "{{").is_none());
        assert_eq!(p.peek_one(TokenKind::Symbol, &["{{", "{%"]).map(|t| t.val.as_str()), Some("{%"));
        assert!(p.peek_n(3, TokenKind::Symbol, "%}").is_some());
        assert!(p.peek_type_n(1, TokenKind::Identifier).is_some());
        assert!(p.peek_n(99, TokenKind::Symbol, "%}").is_none());
        assert!(p.peek_type_n(usize::MAX, TokenKind::Symbol).is_none());
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn test_match_consumes_only_on_success() {
        let toks = tokens("{% if x %}");
        let mut p = Parser::new("test", &toks);
        assert!(p.match_token(TokenKind::Symbol, "{{").is_none());
        assert_eq!(p.index(), 0);
        assert!(p.match_token(TokenKind::Symbol, "{%").is_some());
        assert_eq!(p.index(), 1);
        assert!(p.match_one(TokenKind::Identifier, &["for", "while"]).is_none());
        assert_eq!(p.match_one(TokenKind::Identifier, &["for", "if"]).map(|t| t.val.as_str()), Some("if"));
        assert_eq!(p.match_type(TokenKind::Identifier).map(|t| t.val.as_str()), Some("x"));
        assert_eq!(p.remaining(), 1);
    }

    #[test]
    fn test_consume_n_clamps_at_end() {
        let toks = tokens("{{ a }}");
        let mut p = Parser::new("test", &toks);
        p.consume_n(10);
        assert_eq!(p.index(), 3);
        assert_eq!(p.remaining(), 0);
        assert!(p.current().is_none());
        p.consume();
        assert_eq!(p.index(), 3);
    }

    #[test]
    fn test_checkpoint_restore() {
        let toks = tokens("{% if x %}");
        let mut p = Parser::new("test", &toks);
        p.consume();
        let saved = p.checkpoint();
        p.consume_n(2);
        assert_eq!(p.current().map(|t| t.val.as_str()), Some("%}"));
        p.restore(saved);
        assert_eq!(p.current().map(|t| t.val.as_str()), Some("if"));
    }

    #[test]
    fn test_sub_parser_shares_name_and_template() {
        let toks = tokens("{% if x %}");
        let template = String::from("owner");
        let p = Parser::with_template("page", &toks, &template);
        let sub = p.sub_parser(&toks[1..3]);
        assert_eq!(sub.name(), "page");
        assert_eq!(sub.template().map(String::as_str), Some("owner"));
        assert_eq!(sub.count(), 2);
        assert_eq!(sub.current().map(|t| t.val.as_str()), Some("if"));
    }

    // ========================================================================
    // Error formatting
    // ========================================================================

    #[test]
    fn test_error_uses_current_token_by_default() {
        let toks = tokens("{% if x %}");
        let mut p = Parser::new("page", &toks);
        p.consume();
        let err = p.error("boom", None);
        assert_eq!(
            err.to_string(),
            "[Parse Error in page | Line 1 Col 4 (<Token Typ=Identifier Val='if' Line=1 Col=4>)] boom"
        );
    }

    #[test]
    fn test_error_falls_back_to_last_token_past_end() {
        let toks = tokens("{{ a }}");
        let mut p = Parser::new("page", &toks);
        p.consume_n(3);
        let err = p.error("boom", None);
        assert_eq!((err.line(), err.col()), (Some(1), Some(6)));
    }

    #[test]
    fn test_error_without_tokens_has_no_position() {
        let toks: Vec<Token> = Vec::new();
        let p = Parser::new("page", &toks);
        let err = p.error("empty", None);
        assert!(err.position.is_none());
        assert_eq!(err.to_string(), "[Parse Error in page] empty");
    }

    // ========================================================================
    // Block scanning
    // ========================================================================

    #[test]
    fn test_wrap_simple_block() {
        let toks = tokens("{% if x %}hello{% endif %}");
        let mut p = Parser::new("test", &toks);
        p.consume_n(4);
        let block = p.wrap_until_tag(&["endif"], toy_element).unwrap();
        assert_eq!(block.endtag, "endif");
        assert_eq!(block.nodes, vec![Toy::Text("hello".to_string())]);
        assert!(p.is_at_end());
    }

    #[test]
    fn test_wrap_rejects_arguments_on_closer() {
        let toks = tokens("{% if x %}{% endif extra %}");
        let mut p = Parser::new("test", &toks);
        p.consume_n(4);
        let err = p.wrap_until_tag(&["endif"], toy_element).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"[Parse Error in test | Line 1 Col 14 (<Token Typ=Identifier Val='endif' Line=1 Col=14>)] No arguments allowed for tag 'endif'"
        );
    }

    #[test]
    fn test_wrap_reports_unexpected_eof() {
        let toks = tokens("{% if x %}body");
        let mut p = Parser::new("test", &toks);
        p.consume_n(4);
        let err = p.wrap_until_tag(&["endif"], toy_element).unwrap_err();
        assert_eq!(err.message, "Unexpected EOF, expected tag endif.");
        assert_eq!((err.line(), err.col()), (Some(1), Some(11)));
    }

    #[test]
    fn test_wrap_lists_every_closer_on_eof() {
        let toks = tokens("{% if x %}");
        let mut p = Parser::new("test", &toks);
        p.consume_n(4);
        let err = p.wrap_until_tag(&["elif", "else", "endif"], toy_element).unwrap_err();
        assert_eq!(err.message, "Unexpected EOF, expected tag elif or else or endif.");
    }

    #[test]
    fn test_wrap_nested_same_name_block() {
        let toks = tokens("{% if a %}{% if b %}x{% endif %}y{% endif %}");
        let mut p = Parser::new("test", &toks);
        p.consume_n(4);
        let block = p.wrap_until_tag(&["endif"], toy_element).unwrap();
        assert_eq!(
            block.nodes,
            vec![Toy::If(vec![Toy::Text("x".to_string())]), Toy::Text("y".to_string())]
        );
        assert!(p.is_at_end());
    }

    #[test]
    fn test_wrap_reports_which_closer_matched() {
        let toks = tokens("a{% else %}b{% endif %}");
        let mut p = Parser::new("test", &toks);
        let first = p.wrap_until_tag(&["else", "endif"], toy_element).unwrap();
        assert!(first.ended_with("else"));
        assert_eq!(first.nodes, vec![Toy::Text("a".to_string())]);
        let second = p.wrap_until_tag(&["endif"], toy_element).unwrap();
        assert!(second.ended_with("endif"));
        assert_eq!(second.nodes, vec![Toy::Text("b".to_string())]);
    }

    #[test]
    fn test_wrap_empty_block() {
        let toks = tokens("{% endif %}");
        let mut p = Parser::new("test", &toks);
        let block: NodeWrapper<Toy> = p.wrap_until_tag(&["endif"], toy_element).unwrap();
        assert!(block.nodes.is_empty());
        assert_eq!(p.index(), 3);
    }

    #[test]
    fn test_wrap_delegates_foreign_tags() {
        let toks = tokens("{% endfor %}x{% endif %}");
        let mut p = Parser::new("test", &toks);
        let block = p.wrap_until_tag(&["endif"], toy_element).unwrap();
        assert_eq!(block.nodes.len(), 4);
        assert_eq!(block.nodes[3], Toy::Text("x".to_string()));
    }

    #[test]
    fn test_wrap_propagates_element_errors_unchanged() {
        let toks = tokens("body");
        let mut p = Parser::new("test", &toks);
        let expected = p.error("custom failure", None);
        let err = p
            .wrap_until_tag::<Toy, _>(&["endif"], |inner| Err(inner.error("custom failure", None)))
            .unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn test_wrap_rejects_element_parser_without_progress() {
        let toks = tokens("body");
        let mut p = Parser::new("test", &toks);
        let err = p.wrap_until_tag(&["endif"], |_| Ok(())).unwrap_err();
        assert_eq!(err.message, "Document element consumed no tokens");
    }

    #[test]
    fn test_lone_tag_open_is_left_to_element_parser() {
        let toks = tokens("text{%");
        let mut p = Parser::new("test", &toks);
        let err = p.wrap_until_tag(&["endif"], toy_element).unwrap_err();
        assert_eq!(err.message, "Unexpected EOF, expected tag endif.");
        assert_eq!(err.col(), Some(5));
    }
}
