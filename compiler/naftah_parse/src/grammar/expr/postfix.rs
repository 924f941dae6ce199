//! Postfix expressions: calls, indexing, field access and `++`/`--`.
//!
//! `:` is field access only when glued to both neighbours (`أ:ب`). A `؟`
//! glued to its receiver and followed by a glued `[` or `:` marks the next
//! segment null-safe; any other `؟` is left for the ternary.

use naftah_diagnostic::{positional_after_named, BugError};
use naftah_ir::{CallArg, ExprId, ExprKind, TokenKind, UnaryOp};

use super::starts_expression;
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, BugError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.current_kind() {
                TokenKind::LParen if self.is_callable_shape(expr) => {
                    let args = self.parse_call_args()?;
                    let span = self.expr_span(expr).merge(self.previous_span());
                    let position = self.expr_position(expr);
                    expr = self.alloc_expr(ExprKind::Call { callee: expr, args }, span, position);
                }
                TokenKind::LBracket => {
                    self.advance();
                    expr = self.finish_index(expr, false)?;
                }
                TokenKind::Colon if self.is_glued_field() => {
                    self.advance();
                    expr = self.finish_field(expr, false)?;
                }
                TokenKind::Question if self.cursor.touches_previous() => {
                    let glued = self.cursor.touches_at(1);
                    let bracket = glued && matches!(self.peek_kind(1), TokenKind::LBracket);
                    let field = glued
                        && matches!(self.peek_kind(1), TokenKind::Colon)
                        && matches!(self.peek_kind(2), TokenKind::Ident(_))
                        && self.cursor.touches_at(2);
                    if !(bracket || field) {
                        break;
                    }
                    self.advance();
                    self.advance();
                    expr = if bracket {
                        self.finish_index(expr, true)?
                    } else {
                        self.finish_field(expr, true)?
                    };
                }
                TokenKind::PlusPlus if self.is_postfix_step() => {
                    self.advance();
                    expr = self.make_postfix(UnaryOp::PostIncrement, expr);
                }
                TokenKind::MinusMinus if self.is_postfix_step() => {
                    self.advance();
                    expr = self.make_postfix(UnaryOp::PostDecrement, expr);
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Only names and field paths are called with `(...)`; anything else
    /// followed by `(` starts a new expression.
    fn is_callable_shape(&self, expr: ExprId) -> bool {
        matches!(
            self.arena.get_expr(expr).kind,
            ExprKind::Ident(_) | ExprKind::Field { .. }
        )
    }

    fn is_glued_field(&self) -> bool {
        self.cursor.touches_previous()
            && self.cursor.touches_at(1)
            && matches!(self.peek_kind(1), TokenKind::Ident(_))
    }

    /// `++`/`--` after an operand is postfix when glued to it, when it
    /// ends the line, or when nothing that could be its operand follows.
    /// Otherwise it is the prefix operator of the next statement.
    fn is_postfix_step(&self) -> bool {
        self.cursor.touches_previous()
            || self.cursor.on_new_line(1)
            || !starts_expression(self.peek_kind(1))
    }

    /// `[index]` with the opening bracket consumed.
    fn finish_index(&mut self, receiver: ExprId, optional: bool) -> Result<ExprId, BugError> {
        let index = self.parse_expr()?;
        self.expect(&TokenKind::RBracket)?;
        let span = self.expr_span(receiver).merge(self.previous_span());
        let position = self.expr_position(receiver);
        Ok(self.alloc_expr(
            ExprKind::Index {
                receiver,
                index,
                optional,
            },
            span,
            position,
        ))
    }

    /// `:name` with the colon consumed.
    fn finish_field(&mut self, receiver: ExprId, optional: bool) -> Result<ExprId, BugError> {
        let name = self.expect_ident()?;
        let span = self.expr_span(receiver).merge(self.previous_span());
        let position = self.expr_position(receiver);
        Ok(self.alloc_expr(
            ExprKind::Field {
                receiver,
                name,
                optional,
            },
            span,
            position,
        ))
    }

    /// `(arg, name تعيين arg, ...)`. Positional arguments come first.
    pub(crate) fn parse_call_args(&mut self) -> Result<Vec<CallArg>, BugError> {
        self.expect(&TokenKind::LParen)?;
        let mut args: Vec<CallArg> = Vec::new();
        loop {
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            let start = self.current_span();
            let position = self.current_position();
            let name = match (self.current_kind(), self.peek_kind(1)) {
                (TokenKind::Ident(name), TokenKind::Assign) => Some(name.clone()),
                _ => None,
            };
            if name.is_some() {
                self.advance();
                self.advance();
            }
            if name.is_none() && args.iter().any(|a| a.name.is_some()) {
                return Err(positional_after_named().with_position(position));
            }
            let value = self.parse_expr()?;
            args.push(CallArg {
                name,
                value,
                span: start.merge(self.previous_span()),
            });
            if !self.eat(&TokenKind::Separator) {
                self.expect(&TokenKind::RParen)?;
                return Ok(args);
            }
        }
    }
}
