//! Statement execution.

use std::rc::Rc;

use naftah_diagnostic::{parameter_redeclared, BugError};
use naftah_ir::{CaseArm, ExprId, FunctionDecl, Stmt, StmtId, StmtKind, TryKind};
use naftah_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::environment::Mutability;
use crate::signal::{Flow, LoopSignal, SignalKind};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    pub(crate) fn exec_stmt(&mut self, id: StmtId) -> Result<Flow, BugError> {
        ensure_sufficient_stack(|| {
            let arena = self.arena.clone();
            let stmt = arena.get_stmt(id);
            self.exec_stmt_inner(stmt).map_err(|e| e.at(stmt.position))
        })
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> Result<Flow, BugError> {
        let label = stmt.label.as_deref();
        match &stmt.kind {
            StmtKind::Expr(expr) => Ok(Flow::Normal(self.eval_expr(*expr)?)),
            StmtKind::Declare {
                mutable,
                names,
                ty,
                values,
            } => {
                let mutability = if *mutable {
                    Mutability::Mutable
                } else {
                    Mutability::Immutable
                };
                let values = self.eval_declared_values(names.len(), values)?;
                for (name, value) in names.iter().zip(values) {
                    self.env.declare(name, value, mutability, *ty)?;
                }
                Ok(Flow::unit())
            }
            StmtKind::Assign { target, value } => {
                let value = self.eval_expr(*value)?;
                self.assign_place(*target, value)?;
                Ok(Flow::unit())
            }
            StmtKind::Function(decl) => {
                self.declare_function(decl)?;
                Ok(Flow::unit())
            }
            StmtKind::If {
                branches,
                else_branch,
            } => {
                for (cond, body) in branches {
                    if self.eval_expr(*cond)?.is_truthy() {
                        return self.exec_stmt(*body);
                    }
                }
                self.exec_optional(*else_branch)
            }
            StmtKind::ForRange {
                var,
                start,
                end,
                step,
                descending,
                body,
                else_branch,
            } => self.exec_for_range(
                label,
                var,
                (*start, *end, *step),
                *descending,
                *body,
                *else_branch,
            ),
            StmtKind::ForEach {
                var,
                iterable,
                body,
                else_branch,
            } => self.exec_for_each(label, var, *iterable, *body, *else_branch),
            StmtKind::While { cond, body } => self.exec_while(label, *cond, *body),
            StmtKind::Repeat { body, until } => self.exec_repeat(label, *body, *until),
            StmtKind::Case {
                subject,
                arms,
                else_branch,
            } => self.exec_case(*subject, arms, *else_branch),
            StmtKind::Try { subject, kind } => self.exec_try(*subject, kind),
            StmtKind::Break(target) => Ok(Flow::Signal(LoopSignal::new(
                SignalKind::Break,
                target.clone(),
            ))),
            StmtKind::Continue(target) => Ok(Flow::Signal(LoopSignal::new(
                SignalKind::Continue,
                target.clone(),
            ))),
            StmtKind::Return(values) => {
                let payload = match values.as_slice() {
                    [] => Value::None,
                    [single] => self.eval_expr(*single)?,
                    many => Value::tuple(self.eval_exprs(many)?),
                };
                Ok(Flow::Signal(LoopSignal::ret(payload)))
            }
            StmtKind::Block(stmts) => {
                let flow = self.with_env_scope(|scoped| scoped.exec_statements(stmts))?;
                Ok(match (flow, label) {
                    (Flow::Signal(signal), Some(own))
                        if signal.kind == SignalKind::Break
                            && signal.label.as_deref() == Some(own) =>
                    {
                        tracing::trace!(label = own, "labeled block left");
                        Flow::Normal(signal.payload)
                    }
                    (flow, _) => flow,
                })
            }
        }
    }

    /// Run statements in the current scope. The first signal stops the run;
    /// otherwise the flow carries the last statement's value.
    pub(crate) fn exec_statements(&mut self, stmts: &[StmtId]) -> Result<Flow, BugError> {
        let mut last = Value::None;
        for &id in stmts {
            match self.exec_stmt(id)? {
                Flow::Normal(value) => last = value,
                signal @ Flow::Signal(_) => return Ok(signal),
            }
        }
        Ok(Flow::Normal(last))
    }

    pub(crate) fn exec_optional(&mut self, id: Option<StmtId>) -> Result<Flow, BugError> {
        match id {
            Some(id) => self.exec_stmt(id),
            None => Ok(Flow::unit()),
        }
    }

    /// One value per declared name: none given means `None` for all, a
    /// single value is shared by every name, and missing trailing values
    /// are `None`.
    pub(super) fn eval_declared_values(
        &mut self,
        count: usize,
        values: &[ExprId],
    ) -> Result<Vec<Value>, BugError> {
        match values {
            [] => Ok(vec![Value::None; count]),
            [single] => Ok(vec![self.eval_expr(*single)?; count]),
            many => {
                let mut evaluated = self.eval_exprs(many)?;
                evaluated.resize(count, Value::None);
                Ok(evaluated)
            }
        }
    }

    fn declare_function(&mut self, decl: &FunctionDecl) -> Result<(), BugError> {
        for (i, param) in decl.params.iter().enumerate() {
            if decl.params[..i].iter().any(|p| p.name == param.name) {
                return Err(parameter_redeclared(&decl.name, &param.name));
            }
        }
        self.env.declare_function(Rc::new(FunctionValue {
            decl: decl.clone(),
            arena: self.arena.clone(),
        }))
    }

    /// `اختر`: the first arm with a label equal to the subject runs.
    fn exec_case(
        &mut self,
        subject: ExprId,
        arms: &[CaseArm],
        else_branch: Option<StmtId>,
    ) -> Result<Flow, BugError> {
        let subject = self.eval_expr(subject)?;
        for arm in arms {
            for label in &arm.labels {
                if self.eval_expr(*label)?.loose_eq(&subject) {
                    return self.exec_stmt(arm.body);
                }
            }
        }
        self.exec_optional(else_branch)
    }

    /// `حاول`: a failing subject (or one that evaluates to a captured
    /// error) routes to `فشل`; `None` routes to `معدوم`.
    fn exec_try(&mut self, subject: ExprId, kind: &TryKind) -> Result<Flow, BugError> {
        match kind {
            TryKind::Result { ok, err } => {
                let (arm, value) = match self.eval_expr(subject) {
                    Ok(Value::Error(error)) => (err, Value::Error(error)),
                    Ok(value) => (ok, value),
                    Err(error) => {
                        tracing::debug!(kind = ?error.kind, "try caught an error");
                        (err, Value::error(error))
                    }
                };
                let body = arm.body;
                self.with_binding(&arm.binding, value, Mutability::Immutable, |scoped| {
                    scoped.exec_stmt(body)
                })
            }
            TryKind::Option { some, none } => match self.eval_expr(subject)? {
                Value::None => self.exec_stmt(*none),
                value => {
                    let body = some.body;
                    self.with_binding(&some.binding, value, Mutability::Immutable, |scoped| {
                        scoped.exec_stmt(body)
                    })
                }
            },
        }
    }
}
