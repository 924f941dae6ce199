//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point (`parse_expr`) and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: literals, identifiers, foreign calls, collection literals
//! - `postfix.rs`: calls, indexing, field access, null-safe segments, `++`/`--`
//!
//! Precedence, lowest first: ternary, `؟؟`, `أو`, `و`, `|`, `^`, `&`,
//! equality, relational, shift, additive, multiplicative, prefix unary,
//! power (right-associative), postfix.

mod operators;
mod postfix;
mod primary;

pub(crate) use operators::starts_expression;

use naftah_diagnostic::BugError;
use naftah_ir::{BinaryOp, ExprId, ExprKind, TokenKind, UnaryOp};
use naftah_stack::ensure_sufficient_stack;

use crate::Parser;

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input grows the
    /// stack instead of overflowing it.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, BugError> {
        ensure_sufficient_stack(|| self.parse_ternary())
    }

    /// `cond ؟ a : b`. A `؟` still present here was not claimed by a
    /// null-safe postfix segment, so it opens a ternary.
    fn parse_ternary(&mut self) -> Result<ExprId, BugError> {
        let cond = self.parse_coalesce()?;
        if !self.check(&TokenKind::Question) {
            return Ok(cond);
        }
        self.advance();
        let then_branch = self.parse_expr()?;
        self.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;

        let span = self.expr_span(cond).merge(self.expr_span(else_branch));
        let position = self.expr_position(cond);
        Ok(self.alloc_expr(
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            },
            span,
            position,
        ))
    }

    /// Allocate `left op right`, spanning both operands.
    fn make_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.expr_span(left).merge(self.expr_span(right));
        let position = self.expr_position(left);
        self.alloc_expr(ExprKind::Binary { op, left, right }, span, position)
    }

    /// One left-associative level: `next (op next)*`.
    fn parse_left_assoc(
        &mut self,
        next: fn(&mut Self) -> Result<ExprId, BugError>,
        matcher: fn(&Self) -> Option<BinaryOp>,
    ) -> Result<ExprId, BugError> {
        let mut left = next(self)?;
        while let Some(op) = matcher(self) {
            self.advance();
            let right = next(self)?;
            left = self.make_binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_coalesce(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_or, |p| {
            p.check(&TokenKind::QuestionQuestion).then_some(BinaryOp::Coalesce)
        })
    }

    fn parse_or(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_and, |p| {
            p.check(&TokenKind::Or).then_some(BinaryOp::Or)
        })
    }

    fn parse_and(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_bitwise_or, |p| {
            p.check(&TokenKind::And).then_some(BinaryOp::And)
        })
    }

    fn parse_bitwise_or(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_bitwise_xor, |p| {
            p.check(&TokenKind::Pipe).then_some(BinaryOp::BitOr)
        })
    }

    fn parse_bitwise_xor(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_bitwise_and, |p| {
            p.check(&TokenKind::Caret).then_some(BinaryOp::BitXor)
        })
    }

    fn parse_bitwise_and(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_equality, |p| {
            p.check(&TokenKind::Amp).then_some(BinaryOp::BitAnd)
        })
    }

    fn parse_equality(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_relational, Self::match_equality_op)
    }

    fn parse_relational(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_shift, Self::match_relational_op)
    }

    fn parse_shift(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_additive, Self::match_shift_op)
    }

    fn parse_additive(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_multiplicative, Self::match_additive_op)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, BugError> {
        self.parse_left_assoc(Self::parse_unary, Self::match_multiplicative_op)
    }

    /// Prefix operators. They bind looser than `**`, so `-2 ** 2` is
    /// `-(2 ** 2)`.
    fn parse_unary(&mut self) -> Result<ExprId, BugError> {
        let Some(op) = self.match_prefix_op() else {
            return self.parse_power();
        };
        let start = self.current_span();
        let position = self.current_position();
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.expr_span(operand));
        Ok(self.alloc_expr(ExprKind::Unary { op, operand }, span, position))
    }

    /// `base ** exponent`, right-associative through `parse_unary`.
    fn parse_power(&mut self) -> Result<ExprId, BugError> {
        let base = self.parse_postfix()?;
        if !self.check(&TokenKind::StarStar) {
            return Ok(base);
        }
        self.advance();
        let exponent = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(self.make_binary(BinaryOp::Pow, base, exponent))
    }

    /// Wrap `operand` in a postfix unary node ending at the previous token.
    fn make_postfix(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let span = self.expr_span(operand).merge(self.previous_span());
        let position = self.expr_position(operand);
        self.alloc_expr(ExprKind::Unary { op, operand }, span, position)
    }
}
