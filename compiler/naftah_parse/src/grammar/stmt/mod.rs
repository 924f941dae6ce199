//! Statement parsing.
//!
//! - `mod.rs`: dispatch, labels, declarations, functions, blocks, jumps
//! - `control.rs`: conditionals, loops, case and try
//!
//! Newlines carry no meaning. A statement may be followed by `أنهي`, and
//! separators between statements are skipped.

mod control;

use naftah_diagnostic::{invalid_assignment_target, unknown_type, BugError};
use naftah_ir::{FunctionDecl, Param, Position, Span, StmtId, StmtKind, TokenKind, TypeName};
use naftah_stack::ensure_sufficient_stack;

use super::expr::starts_expression;
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, BugError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<StmtId, BugError> {
        let label = self.parse_label();

        let id = match self.current_kind() {
            TokenKind::Var | TokenKind::Const => self.parse_declaration()?,
            TokenKind::Function => self.parse_function()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Repeat => self.parse_repeat()?,
            TokenKind::Case => self.parse_case()?,
            TokenKind::Try => self.parse_try()?,
            TokenKind::Break | TokenKind::Continue => self.parse_jump()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::LBrace if label.is_some() || !self.brace_opens_literal() => {
                self.parse_block()?
            }
            _ => self.parse_expr_statement()?,
        };

        if let Some(label) = label {
            self.arena.get_stmt_mut(id).label = Some(label);
        }
        self.eat(&TokenKind::End);
        Ok(id)
    }

    /// `name:` directly before a loop or a block.
    fn parse_label(&mut self) -> Option<String> {
        let TokenKind::Ident(name) = self.current_kind() else {
            return None;
        };
        let labels_next = matches!(self.peek_kind(1), TokenKind::Colon)
            && matches!(
                self.peek_kind(2),
                TokenKind::For | TokenKind::While | TokenKind::Repeat | TokenKind::LBrace
            );
        if !labels_next {
            return None;
        }
        let name = name.clone();
        self.advance();
        self.advance();
        Some(name)
    }

    /// Whether the `{` at the cursor opens a collection or object literal
    /// rather than a block.
    ///
    /// `{}` is an empty map. Declarations make an object only when a
    /// separator leads to the next declaration (or the closing brace). An
    /// expression makes a set when a separator follows it, and a map when
    /// a spaced `:` does. A lone `{ expr }` stays a block.
    fn brace_opens_literal(&self) -> bool {
        if matches!(self.peek_kind(1), TokenKind::RBrace) {
            return true;
        }
        let declarations = matches!(self.peek_kind(1), TokenKind::Var | TokenKind::Const);
        let mut depth = 0usize;
        let mut ternaries = 0usize;
        let mut offset = 1;
        loop {
            match self.peek_kind(offset) {
                TokenKind::Eof => return false,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::RBrace if depth == 0 => return false,
                TokenKind::RBrace => depth -= 1,
                _ if depth > 0 => {}
                TokenKind::Separator if declarations => {
                    return matches!(
                        self.peek_kind(offset + 1),
                        TokenKind::Var | TokenKind::Const | TokenKind::RBrace
                    );
                }
                TokenKind::Separator => return true,
                TokenKind::Var | TokenKind::Const if offset == 1 => {}
                TokenKind::Var
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Repeat
                | TokenKind::Case
                | TokenKind::Try
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
                | TokenKind::End => return false,
                TokenKind::Question => {
                    let null_safe = self.cursor.touches_at(offset)
                        && self.cursor.touches_at(offset + 1)
                        && matches!(
                            self.peek_kind(offset + 1),
                            TokenKind::Colon | TokenKind::LBracket
                        );
                    if !null_safe {
                        ternaries += 1;
                    }
                }
                TokenKind::Colon => {
                    let field = self.cursor.touches_at(offset)
                        && self.cursor.touches_at(offset + 1)
                        && matches!(self.peek_kind(offset + 1), TokenKind::Ident(_));
                    let labels_loop = matches!(
                        self.peek_kind(offset + 1),
                        TokenKind::For | TokenKind::While | TokenKind::Repeat
                    );
                    if labels_loop {
                        return false;
                    }
                    if !(field || declarations) {
                        if ternaries == 0 {
                            return true;
                        }
                        ternaries -= 1;
                    }
                }
                _ => {}
            }
            offset += 1;
        }
    }

    pub(crate) fn skip_separators(&mut self) {
        while self.eat(&TokenKind::Separator) {}
    }

    /// Finish a statement that began at `start`.
    fn finish_stmt(&mut self, kind: StmtKind, start: Span, position: Position) -> StmtId {
        let span = start.merge(self.previous_span());
        self.alloc_stmt(kind, span, position)
    }

    /// `متغير أ (: نوع)? (تعيين قيمة)?` and the multi-name form
    /// `متغير أ، ب، ت تعيين 1، 2، 3`.
    pub(crate) fn parse_declaration(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        let mutable = self.check(&TokenKind::Var);
        self.advance();

        let mut names = vec![self.expect_ident()?];
        while self.check(&TokenKind::Separator) && matches!(self.peek_kind(1), TokenKind::Ident(_)) {
            self.advance();
            names.push(self.expect_ident()?);
        }

        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let mut values = Vec::new();
        if self.eat(&TokenKind::Assign) {
            values.push(self.parse_expr()?);
            // Extra values only pair with extra names; a single name stops at
            // the first separator so object literals can list declarations.
            while names.len() > 1 && values.len() < names.len() && self.eat(&TokenKind::Separator) {
                values.push(self.parse_expr()?);
            }
        }

        Ok(self.finish_stmt(
            StmtKind::Declare {
                mutable,
                names,
                ty,
                values,
            },
            start,
            position,
        ))
    }

    fn parse_type_name(&mut self) -> Result<TypeName, BugError> {
        let position = self.current_position();
        let name = self.expect_ident()?;
        TypeName::from_spelling(&name).ok_or_else(|| unknown_type(&name).with_position(position))
    }

    /// `دالة اسم(معاملات) (: نوع)? { ... }`
    fn parse_function(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();

        let name = self.expect_ident()?;
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        loop {
            if self.eat(&TokenKind::RParen) {
                break;
            }
            params.push(self.parse_param()?);
            if !self.eat(&TokenKind::Separator) {
                self.expect(&TokenKind::RParen)?;
                break;
            }
        }

        let return_type = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        let body = self.parse_block()?;

        Ok(self.finish_stmt(
            StmtKind::Function(FunctionDecl {
                name,
                params,
                return_type,
                body,
            }),
            start,
            position,
        ))
    }

    /// `(ثابت|متغير)? اسم (: نوع)? (تعيين افتراضي)?`
    fn parse_param(&mut self) -> Result<Param, BugError> {
        let start = self.current_span();
        let mutable = !self.eat(&TokenKind::Const);
        if mutable {
            self.eat(&TokenKind::Var);
        }
        let name = self.expect_ident()?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        let default = if self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Param {
            name,
            mutable,
            ty,
            default,
            span: start.merge(self.previous_span()),
        })
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.expect(&TokenKind::LBrace)?;

        let mut body = Vec::new();
        loop {
            self.skip_separators();
            if self.eat(&TokenKind::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(self.unexpected(&TokenKind::RBrace.describe()));
            }
            body.push(self.parse_statement()?);
        }

        Ok(self.finish_stmt(StmtKind::Block(body), start, position))
    }

    /// `اكسر label?` / `تابع label?`. A label must sit on the same line.
    fn parse_jump(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        let is_break = self.check(&TokenKind::Break);
        let has_label =
            matches!(self.peek_kind(1), TokenKind::Ident(_)) && !self.cursor.on_new_line(1);
        self.advance();

        let label = if has_label {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let kind = if is_break {
            StmtKind::Break(label)
        } else {
            StmtKind::Continue(label)
        };
        Ok(self.finish_stmt(kind, start, position))
    }

    /// `ارجع (قيمة (، قيمة)*)?`. Values must start on the same line.
    fn parse_return(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        let has_value = starts_expression(self.peek_kind(1)) && !self.cursor.on_new_line(1);
        self.advance();

        let mut values = Vec::new();
        if has_value {
            values.push(self.parse_expr()?);
            while self.eat(&TokenKind::Separator) {
                values.push(self.parse_expr()?);
            }
        }
        Ok(self.finish_stmt(StmtKind::Return(values), start, position))
    }

    /// An expression, or an assignment when `تعيين` follows a place.
    fn parse_expr_statement(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        let target = self.parse_expr()?;

        if !self.check(&TokenKind::Assign) {
            return Ok(self.finish_stmt(StmtKind::Expr(target), start, position));
        }
        if !self.arena.get_expr(target).kind.is_place() {
            return Err(invalid_assignment_target().with_position(position));
        }
        self.advance();
        let value = self.parse_expr()?;
        Ok(self.finish_stmt(StmtKind::Assign { target, value }, start, position))
    }
}
