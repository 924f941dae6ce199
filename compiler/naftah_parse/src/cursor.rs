//! Token cursor for navigating the token stream.
//!
//! Provides lookahead, consumption and the adjacency checks that decide
//! whether a `:` or `؟` is postfix or belongs to a surrounding construct.

use naftah_diagnostic::{unexpected_token, BugError};
use naftah_ir::{Span, Token, TokenKind, TokenList};

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    /// Returned for any position past the end; also covers a list that
    /// was built without a trailing `Eof`.
    eof: Token,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let end = tokens.iter().last().map_or(0, |t| t.span.end);
        let mut eof = Token::dummy(TokenKind::Eof);
        eof.span = Span::new(end, end);
        if let Some(last) = tokens.iter().last() {
            eof.position = last.position;
        }
        Cursor { tokens, eof, pos: 0 }
    }

    /// Current index into the token stream, for speculative parsing.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back to a position returned by [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.tokens.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.peek_token(0)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the token just consumed.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens.get(prev).map_or(Span::DUMMY, |t| t.span),
            None => Span::DUMMY,
        }
    }

    /// Token `offset` places ahead of the current one.
    pub fn peek_token(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    pub fn peek_kind(&self, offset: usize) -> &TokenKind {
        &self.peek_token(offset).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    /// Whether the current token sits directly after the previous one.
    pub fn touches_previous(&self) -> bool {
        self.pos > 0 && self.previous_span().touches(self.current_span())
    }

    /// Whether the token at `offset` sits directly after the one before it.
    pub fn touches_at(&self, offset: usize) -> bool {
        offset > 0 && self.peek_token(offset - 1).span.touches(self.peek_token(offset).span)
    }

    /// Whether the token at `offset` starts a new source line relative to
    /// the current token.
    pub fn on_new_line(&self, offset: usize) -> bool {
        self.peek_token(offset).position.line != self.current().position.line
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consume a token of the given kind, or fail with its position.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, BugError> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<String, BugError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("معرف"))
        }
    }

    /// Syntax error at the current token.
    #[cold]
    pub fn unexpected(&self, expected: &str) -> BugError {
        let token = self.current();
        unexpected_token(&token.kind.describe(), expected).with_position(token.position)
    }
}
