//! Template compilation and rendering options.

use stencil_syntax::LexerConfig;

/// Options shared by every template an [`crate::Environment`] compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Lexer options (`trim_blocks`).
    pub lexer: LexerConfig,
    /// HTML-escape `{{ ... }}` output unless the expression applied `escape` or `safe`.
    pub autoescape: bool,
    /// Treat undefined variables as render errors instead of empty output.
    pub strict_variables: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            lexer: LexerConfig::default(),
            autoescape: true,
            strict_variables: false,
        }
    }
}

impl TemplateConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable autoescaping
    pub fn with_autoescape(mut self, autoescape: bool) -> Self {
        self.autoescape = autoescape;
        self
    }

    /// Enable or disable strict variable lookup
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    /// Drop the first newline after each `%}`
    pub fn with_trim_blocks(mut self, trim_blocks: bool) -> Self {
        self.lexer = self.lexer.with_trim_blocks(trim_blocks);
        self
    }
}
