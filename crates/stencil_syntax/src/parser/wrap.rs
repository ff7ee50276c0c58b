// Block scanning.
//
// `Parser::wrap_until_tag` is the structural primitive behind every block tag: it collects
// document elements until one of the caller's closing tags shows up at the current nesting
// depth. Nested blocks never confuse it, because the element parser it delegates to has already
// consumed a nested block's own closer before control comes back here.

/// The children of a scanned block and the closing tag that ended it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeWrapper<N> {
    /// Name of the closing tag that terminated the scan (one of the requested names).
    pub endtag: String,
    /// Child nodes in document order.
    pub nodes: Vec<N>,
}

impl<N> NodeWrapper<N> {
    /// Return `true` if the block ended with `name`.
    pub fn ended_with(&self, name: &str) -> bool {
        self.endtag == name
    }
}

impl<'a, T: ?Sized> Parser<'a, T> {
    /// Parse document elements until `{% <name> %}` for one of `names`, and consume that tag.
    ///
    /// ## Parameters
    /// - `names`: acceptable closing tag names, in priority order (first match wins).
    /// - `parse_element`: parses exactly one element at the cursor and leaves the cursor right
    ///   after it. It may recurse into `wrap_until_tag` for nested blocks.
    ///
    /// ## Errors
    /// - `Unexpected EOF, expected tag a or b.` if input runs out before a closer.
    /// - `No arguments allowed for tag 'name'` if a closer is followed by anything but `%}`,
    ///   positioned at the closer's name.
    /// - `Document element consumed no tokens` if `parse_element` returns without advancing.
    /// - Any error from `parse_element`, unchanged.
    pub fn wrap_until_tag<N, F>(&mut self, names: &[&str], mut parse_element: F) -> Result<NodeWrapper<N>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<N, ParseError>,
    {
        tracing::trace!(closers = ?names, at = self.idx, "wrapping block");
        let mut nodes = Vec::new();

        while !self.is_at_end() {
            if let Some(tag_ident) = self.closing_tag_ident(names) {
                if self.peek_n(2, TokenKind::Symbol, TAG_CLOSE).is_none() {
                    return Err(self.error(
                        format!("No arguments allowed for tag '{}'", tag_ident.val),
                        Some(tag_ident),
                    ));
                }
                self.consume_n(3);
                tracing::debug!(endtag = %tag_ident.val, children = nodes.len(), "block closed");
                return Ok(NodeWrapper {
                    endtag: tag_ident.val.clone(),
                    nodes,
                });
            }

            let before = self.idx;
            let node = parse_element(self)?;
            if self.idx <= before {
                return Err(self.error("Document element consumed no tokens", self.get(before)));
            }
            nodes.push(node);
        }

        Err(self.error(format!("Unexpected EOF, expected tag {}.", names.join(" or ")), None))
    }

    /// Return the name token if the cursor sits on `{% <ident>` and `<ident>` is in `names`.
    fn closing_tag_ident(&self, names: &[&str]) -> Option<&'a Token> {
        self.peek(TokenKind::Symbol, TAG_OPEN)?;
        let ident = self.peek_type_n(1, TokenKind::Identifier)?;
        names.iter().any(|name| *name == ident.val).then_some(ident)
    }
}
