//! Conditionals, loops, case selection and try matching.

use naftah_diagnostic::BugError;
use naftah_ir::{CaseArm, ExprId, StmtId, StmtKind, TokenKind, TryArm, TryKind};

use crate::Parser;

impl Parser<'_> {
    /// `إذا c إذن {..} (غير_ذلك_إذا c إذن {..})* (غير_ذلك {..})?`
    pub(super) fn parse_if(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();

        let mut branches = vec![self.parse_guarded_block()?];
        while self.eat(&TokenKind::ElseIf) {
            branches.push(self.parse_guarded_block()?);
        }
        let else_branch = self.parse_else()?;

        Ok(self.finish_stmt(
            StmtKind::If {
                branches,
                else_branch,
            },
            start,
            position,
        ))
    }

    fn parse_guarded_block(&mut self) -> Result<(ExprId, StmtId), BugError> {
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Then)?;
        Ok((cond, self.parse_block()?))
    }

    /// Optional `غير_ذلك {..}`.
    fn parse_else(&mut self) -> Result<Option<StmtId>, BugError> {
        if self.eat(&TokenKind::Else) {
            Ok(Some(self.parse_block()?))
        } else {
            Ok(None)
        }
    }

    /// `كرر_حلقة i تعيين a (إلى|تنازليا) b (خطوة s)? إفعل {..} (غير_ذلك {..})?`
    /// or `كرر_حلقة x في xs إفعل {..} (غير_ذلك {..})?`
    pub(super) fn parse_for(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();
        let var = self.expect_ident()?;

        if self.eat(&TokenKind::In) {
            let iterable = self.parse_expr()?;
            self.expect(&TokenKind::Do)?;
            let body = self.parse_block()?;
            let else_branch = self.parse_else()?;
            return Ok(self.finish_stmt(
                StmtKind::ForEach {
                    var,
                    iterable,
                    body,
                    else_branch,
                },
                start,
                position,
            ));
        }

        self.expect(&TokenKind::Assign)?;
        let range_start = self.parse_expr()?;
        let descending = if self.eat(&TokenKind::To) {
            false
        } else if self.eat(&TokenKind::DownTo) {
            true
        } else {
            return Err(self.unexpected("'إلى' أو 'تنازليا'"));
        };
        let end = self.parse_expr()?;
        let step = if self.eat(&TokenKind::Step) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        let else_branch = self.parse_else()?;

        Ok(self.finish_stmt(
            StmtKind::ForRange {
                var,
                start: range_start,
                end,
                step,
                descending,
                body,
                else_branch,
            },
            start,
            position,
        ))
    }

    /// `بينما c إفعل {..}`
    pub(super) fn parse_while(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        Ok(self.finish_stmt(StmtKind::While { cond, body }, start, position))
    }

    /// `كرر {..} حتى c`
    pub(super) fn parse_repeat(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();
        let body = self.parse_block()?;
        self.expect(&TokenKind::Until)?;
        let until = self.parse_expr()?;
        Ok(self.finish_stmt(StmtKind::Repeat { body, until }, start, position))
    }

    /// `اختر x من_بين a، b: {..} c: {..} (غير_ذلك {..})?`
    pub(super) fn parse_case(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();
        let subject = self.parse_expr()?;
        self.expect_among()?;

        let mut arms = vec![self.parse_case_arm()?];
        while let Some(arm) = self.try_case_arm()? {
            arms.push(arm);
        }
        let else_branch = self.parse_else()?;

        Ok(self.finish_stmt(
            StmtKind::Case {
                subject,
                arms,
                else_branch,
            },
            start,
            position,
        ))
    }

    /// `من_بين`, also accepted as the two words `من بين`.
    fn expect_among(&mut self) -> Result<(), BugError> {
        if self.eat(&TokenKind::Among) {
            return Ok(());
        }
        let split = matches!(self.current_kind(), TokenKind::Ident(w) if w == "من")
            && matches!(self.peek_kind(1), TokenKind::Ident(w) if w == "بين");
        if split {
            self.advance();
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&TokenKind::Among.describe()))
        }
    }

    fn parse_case_labels(&mut self) -> Result<Vec<ExprId>, BugError> {
        let mut labels = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Separator) {
            labels.push(self.parse_expr()?);
        }
        Ok(labels)
    }

    fn parse_case_arm(&mut self) -> Result<CaseArm, BugError> {
        let labels = self.parse_case_labels()?;
        self.expect(&TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(CaseArm { labels, body })
    }

    /// Another arm follows only if a label list ending in `: {` parses here;
    /// otherwise the cursor is rolled back and the case statement ends.
    fn try_case_arm(&mut self) -> Result<Option<CaseArm>, BugError> {
        if self.is_at_end()
            || self.check(&TokenKind::Else)
            || self.check(&TokenKind::End)
            || self.check(&TokenKind::RBrace)
        {
            return Ok(None);
        }
        let checkpoint = self.cursor.position();
        let is_arm = self.parse_case_labels().is_ok()
            && self.check(&TokenKind::Colon)
            && matches!(self.peek_kind(1), TokenKind::LBrace);
        self.cursor.set_position(checkpoint);
        if is_arm {
            self.parse_case_arm().map(Some)
        } else {
            Ok(None)
        }
    }

    /// `حاول(x){ نجاح(أ) -> .. فشل(ب) -> .. }` or
    /// `حاول(x){ بعض(أ) -> .. معدوم -> .. }`. Both arms are required.
    pub(super) fn parse_try(&mut self) -> Result<StmtId, BugError> {
        let start = self.current_span();
        let position = self.current_position();
        self.advance();

        self.expect(&TokenKind::LParen)?;
        let subject = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::LBrace)?;
        self.skip_separators();

        let kind = match self.current_kind() {
            TokenKind::Ok => {
                let ok = self.parse_try_arm(&TokenKind::Ok)?;
                self.skip_separators();
                let err = self.parse_try_arm(&TokenKind::Err)?;
                TryKind::Result { ok, err }
            }
            TokenKind::Some => {
                let some = self.parse_try_arm(&TokenKind::Some)?;
                self.skip_separators();
                self.expect(&TokenKind::NoneArm)?;
                let none = self.parse_arm_body()?;
                TryKind::Option { some, none }
            }
            _ => {
                let expected = format!(
                    "{} أو {}",
                    TokenKind::Ok.describe(),
                    TokenKind::Some.describe()
                );
                return Err(self.unexpected(&expected));
            }
        };

        self.skip_separators();
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish_stmt(StmtKind::Try { subject, kind }, start, position))
    }

    /// `keyword(binding) (->|إفعل) body`
    fn parse_try_arm(&mut self, keyword: &TokenKind) -> Result<TryArm, BugError> {
        self.expect(keyword)?;
        self.expect(&TokenKind::LParen)?;
        let binding = self.expect_ident()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_arm_body()?;
        Ok(TryArm { binding, body })
    }

    /// `(->|إفعل)` then a block or a single statement.
    fn parse_arm_body(&mut self) -> Result<StmtId, BugError> {
        if !(self.eat(&TokenKind::Arrow) || self.eat(&TokenKind::Do)) {
            return Err(self.unexpected("'->' أو 'إفعل'"));
        }
        if self.check(&TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_statement()
        }
    }
}
