//! Primary expressions: literals, names, grouping and collection literals.

use naftah_diagnostic::{expected_expression, BugError};
use naftah_ir::{ExprId, ExprKind, Position, Span, StmtId, TokenKind};

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, BugError> {
        let start = self.current_span();
        let position = self.current_position();

        let kind = match self.current_kind().clone() {
            TokenKind::Number(lit) => {
                self.advance();
                ExprKind::Number(lit)
            }
            TokenKind::Str(text) => {
                self.advance();
                ExprKind::Str { text, raw: false }
            }
            TokenKind::Raw => {
                self.advance();
                let TokenKind::Str(text) = self.current_kind().clone() else {
                    return Err(self.unexpected("نص بعد 'خام'"));
                };
                self.advance();
                ExprKind::Str { text, raw: true }
            }
            TokenKind::Char(c) => {
                self.advance();
                ExprKind::Char(c)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Null => {
                self.advance();
                ExprKind::Null
            }
            TokenKind::NaN => {
                self.advance();
                ExprKind::NaN
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::PathSep) {
                    return self.parse_foreign_call(name, start, position);
                }
                ExprKind::Ident(name)
            }
            TokenKind::LParen => return self.parse_paren(),
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_expr_list(&TokenKind::RBracket)?;
                ExprKind::List(items)
            }
            TokenKind::LBrace => return self.parse_brace_literal(),
            _ => {
                let found = self.current().kind.describe();
                return Err(expected_expression(&found).with_position(position));
            }
        };

        let span = start.merge(self.previous_span());
        Ok(self.alloc_expr(kind, span, position))
    }

    /// `a::b::c(args)`, with the leading segment already consumed.
    fn parse_foreign_call(
        &mut self,
        head: String,
        start: Span,
        position: Position,
    ) -> Result<ExprId, BugError> {
        let mut path = vec![head];
        while self.eat(&TokenKind::PathSep) {
            path.push(self.expect_ident()?);
        }
        let args = self.parse_call_args()?;
        let span = start.merge(self.previous_span());
        Ok(self.alloc_expr(ExprKind::ForeignCall { path, args }, span, position))
    }

    /// `()` empty tuple, `(a)` grouping, `(a,)` and `(a, b, ...)` tuples.
    fn parse_paren(&mut self) -> Result<ExprId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();

        if self.eat(&TokenKind::RParen) {
            let span = start.merge(self.previous_span());
            return Ok(self.alloc_expr(ExprKind::Tuple(Vec::new()), span, position));
        }

        let first = self.parse_expr()?;
        if self.eat(&TokenKind::RParen) {
            return Ok(first);
        }
        self.expect(&TokenKind::Separator)?;
        let mut items = vec![first];
        items.extend(self.parse_expr_list(&TokenKind::RParen)?);

        let span = start.merge(self.previous_span());
        Ok(self.alloc_expr(ExprKind::Tuple(items), span, position))
    }

    /// `{}` map, `{k: v, ...}` map, `{a, b}` set, `{متغير أ تعيين 1، ...}` object.
    fn parse_brace_literal(&mut self) -> Result<ExprId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();

        let kind = if self.eat(&TokenKind::RBrace) {
            ExprKind::Map(Vec::new())
        } else if self.check(&TokenKind::Var) || self.check(&TokenKind::Const) {
            ExprKind::Object(self.parse_object_fields()?)
        } else {
            let first = self.parse_expr()?;
            if self.eat(&TokenKind::Colon) {
                let value = self.parse_expr()?;
                let mut entries = vec![(first, value)];
                while self.eat(&TokenKind::Separator) {
                    if self.check(&TokenKind::RBrace) {
                        break;
                    }
                    let key = self.parse_expr()?;
                    self.expect(&TokenKind::Colon)?;
                    let value = self.parse_expr()?;
                    entries.push((key, value));
                }
                self.expect(&TokenKind::RBrace)?;
                ExprKind::Map(entries)
            } else if self.eat(&TokenKind::RBrace) {
                ExprKind::Set(vec![first])
            } else {
                self.expect(&TokenKind::Separator)?;
                let mut items = vec![first];
                items.extend(self.parse_expr_list(&TokenKind::RBrace)?);
                ExprKind::Set(items)
            }
        };

        let span = start.merge(self.previous_span());
        Ok(self.alloc_expr(kind, span, position))
    }

    /// Declarations separated by separators, up to and including `}`.
    fn parse_object_fields(&mut self) -> Result<Vec<StmtId>, BugError> {
        let mut fields = Vec::new();
        loop {
            self.skip_separators();
            if self.eat(&TokenKind::RBrace) {
                return Ok(fields);
            }
            if !(self.check(&TokenKind::Var) || self.check(&TokenKind::Const)) {
                return Err(self.unexpected("'متغير' أو 'ثابت'"));
            }
            fields.push(self.parse_declaration()?);
        }
    }

    /// Separator-delimited expressions up to and including `close`. A
    /// trailing separator is allowed.
    pub(crate) fn parse_expr_list(&mut self, close: &TokenKind) -> Result<Vec<ExprId>, BugError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Separator) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }
}
