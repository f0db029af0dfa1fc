//! TokenStream - cursor over the tokens of one source file
//!
//! The cursor starts *before* the first token; `advance` must be called once
//! to make the first token current. `peek_next` never moves the cursor.

use crate::token::{escape_symbol, Keyword, Token, TokenKind, TokenType};
use jack_error::span::Span;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// `None` before the first `advance`, otherwise in `0..tokens.len()`
    cursor: Option<usize>,
    /// Set once `advance` is called with no tokens left
    exhausted: bool,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: None,
            exhausted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the current token, `None` before the first `advance`
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |i| i + 1)
    }

    /// True while the cursor is before the last token
    pub fn has_more_tokens(&self) -> bool {
        self.next_index() < self.tokens.len()
    }

    /// Moves to the next token and returns it.
    ///
    /// With no tokens left the cursor stays on the last token and the
    /// stream becomes exhausted: `current` returns `None` from then on.
    pub fn advance(&mut self) -> Option<&Token> {
        if self.has_more_tokens() {
            self.cursor = Some(self.next_index());
        } else {
            self.exhausted = true;
        }
        self.current()
    }

    pub fn current(&self) -> Option<&Token> {
        if self.exhausted {
            return None;
        }
        self.cursor.and_then(|i| self.tokens.get(i))
    }

    /// The token after the current one, without moving the cursor
    pub fn peek_next(&self) -> Option<&Token> {
        if self.exhausted {
            return None;
        }
        self.tokens.get(self.next_index())
    }

    /// Puts the cursor back before the first token
    pub fn reset(&mut self) {
        self.cursor = None;
        self.exhausted = false;
    }

    /// Span just past the last token, for end-of-input diagnostics
    pub fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| Span::point(t.span.end, t.span.file_id))
            .unwrap_or_default()
    }

    // =========================================
    // Current-token accessors
    // =========================================

    pub fn token_type(&self) -> Option<TokenType> {
        self.current().map(Token::token_type)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.current()?.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// The current symbol, escaped for markup (`<` becomes `&lt;`)
    pub fn symbol(&self) -> Option<Cow<'static, str>> {
        let ch = self.raw_symbol()?;
        Some(match escape_symbol(ch) {
            Some(entity) => Cow::Borrowed(entity),
            None => Cow::Owned(ch.to_string()),
        })
    }

    /// The current symbol as stored; use this for grammar decisions
    pub fn raw_symbol(&self) -> Option<char> {
        match self.current()?.kind {
            TokenKind::Symbol(ch) => Some(ch),
            _ => None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.current()?.kind {
            TokenKind::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Value of the current integer constant.
    ///
    /// The lexer puts no bound on digit runs, so a constant too large for a
    /// `u64` also gives `None`; its digits stay available through
    /// [`Token::kind`] and still render.
    pub fn int_val(&self) -> Option<u64> {
        match &self.current()?.kind {
            TokenKind::IntConst(digits) => digits.parse().ok(),
            _ => None,
        }
    }

    pub fn string_val(&self) -> Option<&str> {
        match &self.current()?.kind {
            TokenKind::StringConst(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn stream(source: &str) -> TokenStream {
        let (stream, diags) = tokenize(source, 0);
        assert!(diags.is_empty());
        stream
    }

    #[test]
    fn test_cursor_starts_before_first_token() {
        let mut tokens = stream("let x;");
        assert_eq!(tokens.position(), None);
        assert!(tokens.current().is_none());
        assert!(tokens.has_more_tokens());

        tokens.advance();
        assert_eq!(tokens.position(), Some(0));
        assert_eq!(tokens.keyword(), Some(Keyword::Let));
    }

    #[test]
    fn test_has_more_tokens_until_last() {
        let mut tokens = stream("a b");
        tokens.advance();
        assert!(tokens.has_more_tokens());
        tokens.advance();
        assert!(!tokens.has_more_tokens());
        assert_eq!(tokens.identifier(), Some("b"));

        assert!(tokens.advance().is_none());
        assert_eq!(tokens.position(), Some(1));
        assert!(tokens.current().is_none());
    }

    #[test]
    fn test_peek_does_not_move_cursor() {
        let mut tokens = stream("foo [ 1 ]");
        tokens.advance();

        for _ in 0..3 {
            let next = tokens.peek_next().map(|t| t.kind.clone());
            assert_eq!(next, Some(TokenKind::Symbol('[')));
        }
        assert_eq!(tokens.position(), Some(0));
        assert_eq!(tokens.identifier(), Some("foo"));
    }

    #[test]
    fn test_oversized_integer() {
        let mut tokens = stream("123456789012345678901234567890");
        let token = tokens.advance().cloned().unwrap();
        assert_eq!(tokens.token_type(), Some(TokenType::IntegerConstant));
        assert_eq!(tokens.int_val(), None);
        assert_eq!(token.kind.rendered(), "123456789012345678901234567890");
    }

    #[test]
    fn test_accessors_match_kind_only() {
        let mut tokens = stream("42 \"hi\" <");
        tokens.advance();
        assert_eq!(tokens.token_type(), Some(TokenType::IntegerConstant));
        assert_eq!(tokens.int_val(), Some(42));
        assert_eq!(tokens.string_val(), None);
        assert_eq!(tokens.symbol(), None);

        tokens.advance();
        assert_eq!(tokens.string_val(), Some("hi"));
        assert_eq!(tokens.int_val(), None);

        tokens.advance();
        assert_eq!(tokens.symbol().as_deref(), Some("&lt;"));
        assert_eq!(tokens.raw_symbol(), Some('<'));
        assert_eq!(tokens.keyword(), None);
    }

    #[test]
    fn test_reset() {
        let mut tokens = stream("a");
        tokens.advance();
        tokens.advance();
        tokens.reset();
        assert_eq!(tokens.position(), None);
        assert_eq!(
            tokens.advance().map(|t| t.kind.clone()),
            Some(TokenKind::Identifier("a".into()))
        );
    }

    #[test]
    fn test_empty_stream() {
        let mut tokens = stream("// nothing here");
        assert!(tokens.is_empty());
        assert!(!tokens.has_more_tokens());
        assert!(tokens.advance().is_none());
        assert!(tokens.peek_next().is_none());
    }
}
