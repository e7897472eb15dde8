//! Cursor over a tokenized input line.
//!
//! Dispatch consumes input that has already been split into tokens (quoting
//! rules are the token producer's responsibility). [`TokenCursor`] tracks a
//! position into that token slice; argument parsers advance it by however
//! many tokens they consume, and the resolver rewinds it when a candidate
//! fails.

/// Read cursor over a slice of input tokens.
///
/// # Examples
///
/// ```
/// use command_graph_core::TokenCursor;
///
/// let tokens = vec!["add".to_string(), "1".to_string(), "2".to_string()];
/// let mut cursor = TokenCursor::new(&tokens);
///
/// assert_eq!(cursor.peek(), Some("add"));
/// assert_eq!(cursor.next(), Some("add"));
/// assert_eq!(cursor.remaining(), 2);
///
/// let mark = cursor.position();
/// cursor.next();
/// cursor.set_position(mark); // rewind after a failed candidate
/// assert_eq!(cursor.peek(), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor at the start of `tokens`.
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(|s| s.as_str())
    }

    /// Consumes and returns the current token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes every remaining token and returns them in order.
    pub fn take_rest(&mut self) -> &'a [String] {
        let rest = &self.tokens[self.pos..];
        self.pos = self.tokens.len();
        rest
    }

    /// Current position, usable with [`set_position`](Self::set_position) to
    /// rewind after a failed parse attempt.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewinds (or advances) the cursor to a previously saved position.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    /// Returns `true` once every token has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The tokens consumed so far, in order.
    pub fn consumed(&self) -> &'a [String] {
        &self.tokens[..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_peek_does_not_consume() {
        let toks = tokens(&["a", "b"]);
        let cursor = TokenCursor::new(&toks);
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn test_next_advances_to_exhaustion() {
        let toks = tokens(&["a", "b"]);
        let mut cursor = TokenCursor::new(&toks);
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.next(), Some("b"));
        assert_eq!(cursor.next(), None);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_rewind_restores_state() {
        let toks = tokens(&["a", "b", "c"]);
        let mut cursor = TokenCursor::new(&toks);
        cursor.next();
        let mark = cursor.position();
        cursor.next();
        cursor.next();
        cursor.set_position(mark);
        assert_eq!(cursor.peek(), Some("b"));
        assert_eq!(cursor.consumed(), &toks[..1]);
    }

    #[test]
    fn test_take_rest_consumes_everything() {
        let toks = tokens(&["say", "hello", "world"]);
        let mut cursor = TokenCursor::new(&toks);
        cursor.next();
        assert_eq!(cursor.take_rest(), &toks[1..]);
        assert!(cursor.is_exhausted());
    }
}
