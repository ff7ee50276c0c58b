/// Cursor and lookahead primitives.
///
/// Three families, split by side effect:
/// - `peek*`: inspect, never move the cursor
/// - `match*`: inspect, and consume exactly one token on success only
/// - `consume*`: advance unconditionally (after the caller already peeked)
///
/// Every accessor goes through [`Parser::get`], so nothing here can index out of bounds.
impl<'a, T: ?Sized> Parser<'a, T> {
    // ========================================================================
    // Access
    // ========================================================================

    /// Return `tokens[i]`, or `None` if `i` is out of range.
    pub fn get(&self, i: usize) -> Option<&'a Token> {
        self.tokens.get(i)
    }

    /// Return `tokens[idx + shift]`, or `None` if out of range (including on overflow).
    pub fn get_r(&self, shift: usize) -> Option<&'a Token> {
        self.idx.checked_add(shift).and_then(|i| self.get(i))
    }

    /// Return the token under the cursor, or `None` at end of input.
    pub fn current(&self) -> Option<&'a Token> {
        self.get(self.idx)
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.idx)
    }

    /// Total number of tokens.
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Return `true` if every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    // ========================================================================
    // Peek (never consumes)
    // ========================================================================

    /// Return the current token if its kind matches.
    pub fn peek_type(&self, kind: TokenKind) -> Option<&'a Token> {
        self.peek_type_n(0, kind)
    }

    /// Return the current token if its kind and value match.
    pub fn peek(&self, kind: TokenKind, val: &str) -> Option<&'a Token> {
        self.peek_n(0, kind, val)
    }

    /// Return the current token if its kind matches and its value is one of `vals`.
    ///
    /// Candidates are tried in order; the first match wins.
    pub fn peek_one(&self, kind: TokenKind, vals: &[&str]) -> Option<&'a Token> {
        vals.iter().find_map(|val| self.peek(kind, val))
    }

    /// Return `tokens[idx + shift]` if its kind matches.
    pub fn peek_type_n(&self, shift: usize, kind: TokenKind) -> Option<&'a Token> {
        self.get_r(shift).filter(|t| t.kind == kind)
    }

    /// Return `tokens[idx + shift]` if its kind and value match.
    pub fn peek_n(&self, shift: usize, kind: TokenKind, val: &str) -> Option<&'a Token> {
        self.get_r(shift).filter(|t| t.is(kind, val))
    }

    // ========================================================================
    // Match (consumes on success only)
    // ========================================================================

    /// Consume and return the current token if its kind matches.
    pub fn match_type(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let tok = self.peek_type(kind)?;
        self.consume();
        Some(tok)
    }

    /// Consume and return the current token if its kind and value match.
    pub fn match_token(&mut self, kind: TokenKind, val: &str) -> Option<&'a Token> {
        let tok = self.peek(kind, val)?;
        self.consume();
        Some(tok)
    }

    /// Consume and return the current token if its kind matches and its value is one of `vals`.
    pub fn match_one(&mut self, kind: TokenKind, vals: &[&str]) -> Option<&'a Token> {
        let tok = self.peek_one(kind, vals)?;
        self.consume();
        Some(tok)
    }

    // ========================================================================
    // Consume (unconditional)
    // ========================================================================

    /// Consume one token.
    pub fn consume(&mut self) {
        self.consume_n(1);
    }

    /// Consume `count` tokens. The cursor stops at end of input.
    pub fn consume_n(&mut self, count: usize) {
        self.idx = self.idx.saturating_add(count).min(self.tokens.len());
    }
}
