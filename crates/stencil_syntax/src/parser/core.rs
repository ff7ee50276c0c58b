// Parser core types.
//
// This chunk defines the `Parser` type, its constructors and the opaque cursor `Checkpoint`.
// It is `include!`'d into `crate::parser`.

/// Opaque, copyable cursor position.
///
/// The parser never backtracks on its own. A tag handler that wants to try a parse path and
/// retry another captures a checkpoint first and hands it back to [`Parser::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

/// Cursor-based parser state.
///
/// ## Notes
/// - `tokens` is never mutated; only `idx` moves, and only forward unless a caller restores a
///   [`Checkpoint`] it captured itself.
/// - `idx` is always in `[0, tokens.len()]`.
/// - `template` is a non-owning back-reference for tag handlers (e.g. to resolve
///   template-relative resources). The parser itself never looks at it.
/// - A parser is single-use and lives only for one compilation.
pub struct Parser<'a, T: ?Sized = ()> {
    name: &'a str,
    idx: usize,
    tokens: &'a [Token],
    template: Option<&'a T>,
}

impl<'a> Parser<'a> {
    /// Create a parser with no template back-reference.
    ///
    /// ## Parameters
    /// - `name`: logical name used in diagnostics.
    /// - `tokens`: token stream produced by [`crate::lexer`].
    pub fn new(name: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            name,
            idx: 0,
            tokens,
            template: None,
        }
    }
}

impl<'a, T: ?Sized> Parser<'a, T> {
    /// Create a parser that carries a back-reference to the template being compiled.
    pub fn with_template(name: &'a str, tokens: &'a [Token], template: &'a T) -> Self {
        Self {
            name,
            idx: 0,
            tokens,
            template: Some(template),
        }
    }

    /// Create a fresh parser over `tokens` sharing this parser's name and template.
    ///
    /// Tag dispatch uses this to hand a tag handler just its argument tokens.
    pub fn sub_parser(&self, tokens: &'a [Token]) -> Self {
        Self {
            name: self.name,
            idx: 0,
            tokens,
            template: self.template,
        }
    }

    /// Logical name used in diagnostics.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Back-reference to the enclosing template, if any.
    pub fn template(&self) -> Option<&'a T> {
        self.template
    }

    /// The full token sequence, independent of the cursor.
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Current absolute cursor index.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Capture the cursor position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.idx)
    }

    /// Move the cursor back (or forward) to a previously captured position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.idx = checkpoint.0.min(self.tokens.len());
    }
}
