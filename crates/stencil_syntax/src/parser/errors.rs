/// Positioned error construction.
impl<'a, T: ?Sized> Parser<'a, T> {
    /// Build a [`ParseError`] positioned at `token`.
    ///
    /// ## Parameters
    /// - `msg`: the message shown after the position.
    /// - `token`: the offending token. When `None`, the current token is used; past the end the
    ///   last token is used; with an empty token sequence there is no position.
    ///
    /// ## Notes
    /// - Every parse failure in this crate, and in tag handlers, is built here so all diagnostics
    ///   share one format.
    pub fn error(&self, msg: impl Into<String>, token: Option<&Token>) -> ParseError {
        let token = token.or_else(|| self.current()).or_else(|| self.tokens.last());
        ParseError::new(self.name, token.map(Position::of), msg)
    }
}
