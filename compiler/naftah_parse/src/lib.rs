//! Recursive descent parser for Naftah.
//!
//! Consumes a [`TokenList`] and builds a flat, arena-allocated AST. The
//! parser is fail-fast: the first token mismatch aborts the parse with a
//! positioned syntax error. There is no recovery or resynchronisation.

mod cursor;
mod grammar;

use cursor::Cursor;
use naftah_diagnostic::BugError;
use naftah_ir::{
    Expr, ExprArena, ExprId, ExprKind, Position, Program, SharedArena, Span, Stmt, StmtId,
    StmtKind, Token, TokenKind, TokenList,
};

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
        }
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn current_position(&self) -> Position {
        self.cursor.current().position
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn peek_kind(&self, offset: usize) -> &TokenKind {
        self.cursor.peek_kind(offset)
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Consume `kind` if present.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, BugError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<String, BugError> {
        self.cursor.expect_ident()
    }

    #[inline]
    fn unexpected(&self, expected: &str) -> BugError {
        self.cursor.unexpected(expected)
    }

    // Arena helpers

    fn alloc_expr(&mut self, kind: ExprKind, span: Span, position: Position) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span, position))
    }

    fn alloc_stmt(&mut self, kind: StmtKind, span: Span, position: Position) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, span, position))
    }

    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn expr_position(&self, id: ExprId) -> Position {
        self.arena.get_expr(id).position
    }

    /// Parse the whole token stream as a program.
    pub fn parse_program(mut self) -> Result<Program, BugError> {
        let mut body = Vec::new();
        loop {
            self.skip_separators();
            if self.is_at_end() {
                break;
            }
            body.push(self.parse_statement()?);
        }
        tracing::debug!(
            statements = body.len(),
            exprs = self.arena.expr_count(),
            "parsed program"
        );
        Ok(Program {
            arena: SharedArena::new(self.arena),
            body,
        })
    }
}

/// Parse a token list into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList) -> Result<Program, BugError> {
    Parser::new(tokens).parse_program()
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> Result<Program, BugError> {
    let tokens = naftah_lexer::lex(source)?;
    parse(&tokens)
}

#[cfg(test)]
mod tests;
