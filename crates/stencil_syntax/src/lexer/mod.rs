//! Lexer for stencil templates.
//!
//! Splits template source into a flat token stream:
//! - Text outside delimiters becomes one `Html` token per run
//! - `{{ ... }}` and `{% ... %}` delimiters become `Symbol` tokens
//! - Inside delimiters: identifiers, keywords, numbers, strings and symbols
//! - `{# ... #}` comments are dropped entirely
//!
//! ## Notes
//! - An unclosed `{{`/`{%` at end of input is not a lexer error; the parser reports it with
//!   full token context.
//! - Lines and columns are 1-based; columns count characters, not bytes.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::diagnostics::LexError;
use crate::vocab::keywords;
use crate::vocab::symbols::{self, COMMENT_CLOSE, COMMENT_OPEN, TAG_CLOSE, TAG_OPEN, VAR_CLOSE, VAR_OPEN};

/// Lexer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerConfig {
    /// Drop the first newline directly after a `%}`.
    pub trim_blocks: bool,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable `trim_blocks`.
    pub fn with_trim_blocks(mut self, trim_blocks: bool) -> Self {
        self.trim_blocks = trim_blocks;
        self
    }
}

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Text] --sees {{ or {%--> [Inside tag, waiting for the matching closer]
//   ^                                  |
//   +-------------- sees }} or %} -----+
// [Text] --sees {#--> skip to #} --> [Text]
// ============================================================================

/// Lexer for a single template source.
pub struct Lexer<'a> {
    name: &'a str,
    source: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    /// Closing delimiter we are waiting for, if inside `{{`/`{%`.
    closer: Option<&'static str>,
    config: LexerConfig,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    ///
    /// ## Parameters
    /// - `name`: logical template name, used in diagnostics.
    /// - `source`: template text.
    /// - `config`: lexer options.
    pub fn new(name: &'a str, source: &'a str, config: LexerConfig) -> Self {
        Self {
            name,
            source,
            pos: 0,
            line: 1,
            col: 1,
            closer: None,
            config,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Errors
    /// Returns the first [`LexError`] (unterminated string or comment, unexpected character).
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            match self.closer {
                Some(closer) => self.scan_inside(closer)?,
                None => self.scan_text()?,
            }
        }
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advance `len` bytes, keeping line/column in sync.
    fn bump(&mut self, len: usize) {
        let end = (self.pos + len).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos = end;
    }

    fn push(&mut self, kind: TokenKind, val: impl Into<String>, line: usize, col: usize) {
        self.tokens.push(Token::new(kind, val, line, col));
    }

    fn error(&self, line: usize, col: usize, message: impl Into<String>) -> LexError {
        LexError::new(self.name, line, col, message)
    }

    // ========================================================================
    // Text mode
    // ========================================================================

    fn scan_text(&mut self) -> Result<(), LexError> {
        let rest = self.rest();
        let next = [VAR_OPEN, TAG_OPEN, COMMENT_OPEN]
            .iter()
            .filter_map(|delim| rest.find(delim))
            .min();

        match next {
            Some(0) => {
                let (line, col) = (self.line, self.col);
                if rest.starts_with(COMMENT_OPEN) {
                    // The closer is searched after the opener, so `{#}` does not close itself.
                    let body = &rest[COMMENT_OPEN.len()..];
                    let Some(end) = body.find(COMMENT_CLOSE) else {
                        return Err(self.error(line, col, "Unterminated comment"));
                    };
                    self.bump(COMMENT_OPEN.len() + end + COMMENT_CLOSE.len());
                } else if rest.starts_with(TAG_OPEN) {
                    self.bump(TAG_OPEN.len());
                    self.push(TokenKind::Symbol, TAG_OPEN, line, col);
                    self.closer = Some(TAG_CLOSE);
                } else {
                    self.bump(VAR_OPEN.len());
                    self.push(TokenKind::Symbol, VAR_OPEN, line, col);
                    self.closer = Some(VAR_CLOSE);
                }
            }
            Some(idx) => self.scan_html(idx),
            None => self.scan_html(rest.len()),
        }
        Ok(())
    }

    fn scan_html(&mut self, len: usize) {
        let (line, col) = (self.line, self.col);
        let text = &self.source[self.pos..self.pos + len];
        self.bump(len);
        self.push(TokenKind::Html, text, line, col);
    }

    // ========================================================================
    // Tag mode
    // ========================================================================

    fn scan_inside(&mut self, closer: &'static str) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump(c.len_utf8());
            } else {
                break;
            }
        }

        let Some(c) = self.peek() else {
            return Ok(());
        };
        let (line, col) = (self.line, self.col);

        if self.rest().starts_with(closer) {
            self.bump(closer.len());
            self.push(TokenKind::Symbol, closer, line, col);
            self.closer = None;
            if closer == TAG_CLOSE && self.config.trim_blocks {
                self.trim_newline();
            }
            return Ok(());
        }

        match c {
            '"' | '\'' => self.scan_string(c, line, col),
            '0'..='9' => {
                self.scan_number(line, col);
                Ok(())
            }
            _ if is_ident_start(c) => {
                self.scan_identifier(line, col);
                Ok(())
            }
            _ => match symbols::longest_prefix(self.rest()) {
                Some(info) => {
                    self.bump(info.canonical.len());
                    self.push(TokenKind::Symbol, info.canonical, line, col);
                    Ok(())
                }
                None => Err(self.error(line, col, format!("Unexpected character '{}'", c))),
            },
        }
    }

    fn trim_newline(&mut self) {
        if self.rest().starts_with("\r\n") {
            self.bump(2);
        } else if self.rest().starts_with('\n') {
            self.bump(1);
        }
    }

    fn scan_identifier(&mut self, line: usize, col: usize) {
        let len = self
            .rest()
            .find(|c: char| !is_ident_continue(c))
            .unwrap_or(self.rest().len());
        let spelling = &self.source[self.pos..self.pos + len];
        self.bump(len);

        let kind = if keywords::from_str(spelling).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, spelling, line, col);
    }

    /// Scan `123` or `1.5`. A `.` not followed by a digit is left for the attribute-access symbol.
    fn scan_number(&mut self, line: usize, col: usize) {
        let rest = self.rest();
        let mut len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let after = &rest[len..];
        if after.starts_with('.') && after[1..].starts_with(|c: char| c.is_ascii_digit()) {
            let frac = after[1..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len() - 1);
            len += 1 + frac;
        }
        let spelling = &self.source[self.pos..self.pos + len];
        self.bump(len);
        self.push(TokenKind::Number, spelling, line, col);
    }

    fn scan_string(&mut self, quote: char, line: usize, col: usize) -> Result<(), LexError> {
        let mut value = String::new();
        let mut chars = self.rest().char_indices().skip(1);

        while let Some((idx, c)) = chars.next() {
            if c == quote {
                self.bump(idx + c.len_utf8());
                self.push(TokenKind::String, value, line, col);
                return Ok(());
            }
            if c == '\\' {
                match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, esc @ ('\\' | '\'' | '"'))) => value.push(esc),
                    Some((_, other)) => {
                        return Err(self.error(line, col, format!("Unknown escape sequence '\\{}'", other)));
                    }
                    None => break,
                }
            } else {
                value.push(c);
            }
        }

        Err(self.error(line, col, "Unterminated string literal"))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a template source.
///
/// This is a shorthand for `Lexer::new(name, source, config).tokenize()`.
#[tracing::instrument(skip_all, fields(name = name, source_len = source.len()))]
pub fn lex(name: &str, source: &str, config: LexerConfig) -> Result<Vec<Token>, LexError> {
    Lexer::new(name, source, config).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_vals(source: &str) -> Vec<(TokenKind, String)> {
        lex("test", source, LexerConfig::default())
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.val))
            .collect()
    }

    #[test]
    fn test_plain_text_is_single_html_token() {
        assert_eq!(kinds_and_vals("hello"), vec![(TokenKind::Html, "hello".to_string())]);
    }

    #[test]
    fn test_tag_tokens_and_positions() {
        let tokens = lex("test", "{% if x %}hello{% endif %}", LexerConfig::default()).unwrap();
        let vals: Vec<&str> = tokens.iter().map(|t| t.val.as_str()).collect();
        assert_eq!(vals, vec!["{%", "if", "x", "%}", "hello", "{%", "endif", "%}"]);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!((tokens[6].line, tokens[6].col), (1, 19));
    }

    #[test]
    fn test_keywords_numbers_strings_and_symbols() {
        let toks = kinds_and_vals(r#"{{ not a.b[0] | upper }}{% for x in 'it\'s' %}{{ 1.5 }}"#);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Symbol, "{{".to_string()),
                (TokenKind::Keyword, "not".to_string()),
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Symbol, ".".to_string()),
                (TokenKind::Identifier, "b".to_string()),
                (TokenKind::Symbol, "[".to_string()),
                (TokenKind::Number, "0".to_string()),
                (TokenKind::Symbol, "]".to_string()),
                (TokenKind::Symbol, "|".to_string()),
                (TokenKind::Identifier, "upper".to_string()),
                (TokenKind::Symbol, "}}".to_string()),
                (TokenKind::Symbol, "{%".to_string()),
                (TokenKind::Identifier, "for".to_string()),
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::Keyword, "in".to_string()),
                (TokenKind::String, "it's".to_string()),
                (TokenKind::Symbol, "%}".to_string()),
                (TokenKind::Symbol, "{{".to_string()),
                (TokenKind::Number, "1.5".to_string()),
                (TokenKind::Symbol, "}}".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(
            kinds_and_vals("a{# ignored {% if %} #}b"),
            vec![(TokenKind::Html, "a".to_string()), (TokenKind::Html, "b".to_string())]
        );
    }

    #[test]
    fn test_comment_opener_does_not_close_itself() {
        assert_eq!(
            kinds_and_vals("a{#} x #}b"),
            vec![(TokenKind::Html, "a".to_string()), (TokenKind::Html, "b".to_string())]
        );
        assert_eq!(kinds_and_vals("{##}"), vec![]);
        assert!(lex("page", "{#}", LexerConfig::default()).is_err());
    }

    #[test]
    fn test_multiline_positions() {
        let tokens = lex("test", "line one\n  {{ name }}", LexerConfig::default()).unwrap();
        let name = tokens.iter().find(|t| t.val == "name").unwrap();
        assert_eq!((name.line, name.col), (2, 6));
    }

    #[test]
    fn test_trim_blocks_drops_one_newline_after_tag() {
        let config = LexerConfig::new().with_trim_blocks(true);
        let tokens = lex("test", "{% if x %}\n\nbody", config).unwrap();
        assert_eq!(tokens.last().unwrap().val, "\nbody");

        let tokens = lex("test", "{% if x %}\nbody", LexerConfig::default()).unwrap();
        assert_eq!(tokens.last().unwrap().val, "\nbody");
    }

    #[test]
    fn test_unclosed_tag_at_end_is_not_a_lexer_error() {
        let vals: Vec<String> = kinds_and_vals("text {%").into_iter().map(|(_, v)| v).collect();
        assert_eq!(vals, vec!["text ".to_string(), "{%".to_string()]);
    }

    #[test]
    fn test_unterminated_string_is_reported_at_quote() {
        let err = lex("page", "{{ 'abc }}", LexerConfig::default()).unwrap_err();
        assert_eq!((err.line, err.col), (1, 4));
        assert_eq!(err.to_string(), "[Lexer Error in page | Line 1 Col 4] Unterminated string literal");
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("page", "{{ a ? b }}", LexerConfig::default()).unwrap_err();
        assert_eq!(err.message, "Unexpected character '?'");
    }

    #[test]
    fn test_unterminated_comment() {
        let err = lex("page", "x {# open", LexerConfig::default()).unwrap_err();
        assert_eq!((err.line, err.col, err.message.as_str()), (1, 3, "Unterminated comment"));
    }
}
