//! Loops: `كرر_حلقة ... تعيين ... إلى`, `كرر_حلقة ... في`, `بينما` and
//! `كرر ... حتى`.
//!
//! Each loop runs its body through [`loop_action`], which decides whether a
//! signal is the loop's own or belongs further out. A loop that is left
//! through `اكسر` skips its `غير_ذلك` branch; a loop that runs out does not.

use std::cmp::Ordering;

use naftah_diagnostic::{
    ascending_bounds_reversed, descending_bounds_reversed, invalid_loop_step,
    loop_bounds_not_numeric, BugError,
};
use naftah_ir::{BinaryOp, ExprId, StmtId};

use super::Interpreter;
use crate::environment::Mutability;
use crate::signal::{loop_action, Flow, LoopAction};
use crate::value::{Number, Value};

/// How a loop ended.
enum LoopExit {
    Completed,
    Broken(Value),
    Propagated(Flow),
}

impl LoopExit {
    fn from_action(action: LoopAction) -> Option<LoopExit> {
        match action {
            LoopAction::Next => None,
            LoopAction::Exit(value) => Some(LoopExit::Broken(value)),
            LoopAction::Propagate(signal) => Some(LoopExit::Propagated(Flow::Signal(signal))),
        }
    }
}

impl Interpreter {
    pub(super) fn exec_for_range(
        &mut self,
        label: Option<&str>,
        var: &str,
        (start, end, step): (ExprId, ExprId, Option<ExprId>),
        descending: bool,
        body: StmtId,
        else_branch: Option<StmtId>,
    ) -> Result<Flow, BugError> {
        let start = self.loop_bound(var, start)?;
        let end = self.loop_bound(var, end)?;
        let step = match step {
            Some(step) => self.loop_bound(var, step)?,
            None => Number::from_i64(1),
        };
        if step.compare(&Number::from_i64(0)) != Some(Ordering::Greater) {
            return Err(invalid_loop_step(var));
        }
        let order = start.compare(&end);
        if !descending && order == Some(Ordering::Greater) {
            return Err(ascending_bounds_reversed());
        }
        if descending && order == Some(Ordering::Less) {
            return Err(descending_bounds_reversed());
        }
        let (advance, past_end) = if descending {
            (BinaryOp::Sub, Ordering::Less)
        } else {
            (BinaryOp::Add, Ordering::Greater)
        };

        tracing::debug!(label, var, descending, "counted loop");
        let exit = self.with_binding(var, Value::None, Mutability::Mutable, |scoped| {
            let mut current = start;
            loop {
                match current.compare(&end) {
                    Some(order) if order != past_end => {}
                    _ => return Ok(LoopExit::Completed),
                }
                scoped.env.assign(var, Value::Number(current.clone()))?;
                if let Some(exit) = scoped.run_iteration(label, body)? {
                    return Ok(exit);
                }
                current = current.binary(advance, &step)?;
            }
        })?;
        self.finish_loop(label, exit, else_branch)
    }

    pub(super) fn exec_for_each(
        &mut self,
        label: Option<&str>,
        var: &str,
        iterable: ExprId,
        body: StmtId,
        else_branch: Option<StmtId>,
    ) -> Result<Flow, BugError> {
        let items = self.eval_expr(iterable)?.iteration_items()?;
        tracing::debug!(label, var, items = items.len(), "for-each loop");
        let exit = self.with_binding(var, Value::None, Mutability::Mutable, |scoped| {
            for item in items {
                scoped.env.assign(var, item)?;
                if let Some(exit) = scoped.run_iteration(label, body)? {
                    return Ok(exit);
                }
            }
            Ok(LoopExit::Completed)
        })?;
        self.finish_loop(label, exit, else_branch)
    }

    pub(super) fn exec_while(
        &mut self,
        label: Option<&str>,
        cond: ExprId,
        body: StmtId,
    ) -> Result<Flow, BugError> {
        tracing::debug!(label, "while loop");
        while self.eval_expr(cond)?.is_truthy() {
            if let Some(exit) = self.run_iteration(label, body)? {
                return self.finish_loop(label, exit, None);
            }
        }
        self.finish_loop(label, LoopExit::Completed, None)
    }

    /// The body runs at least once; the loop stops when `until` holds.
    pub(super) fn exec_repeat(
        &mut self,
        label: Option<&str>,
        body: StmtId,
        until: ExprId,
    ) -> Result<Flow, BugError> {
        tracing::debug!(label, "repeat loop");
        loop {
            if let Some(exit) = self.run_iteration(label, body)? {
                return self.finish_loop(label, exit, None);
            }
            if self.eval_expr(until)?.is_truthy() {
                return self.finish_loop(label, LoopExit::Completed, None);
            }
        }
    }

    fn run_iteration(
        &mut self,
        label: Option<&str>,
        body: StmtId,
    ) -> Result<Option<LoopExit>, BugError> {
        let flow = self.exec_stmt(body)?;
        Ok(LoopExit::from_action(loop_action(flow, label)))
    }

    fn finish_loop(
        &mut self,
        label: Option<&str>,
        exit: LoopExit,
        else_branch: Option<StmtId>,
    ) -> Result<Flow, BugError> {
        match exit {
            LoopExit::Completed => {
                tracing::trace!(label, "loop completed");
                match self.exec_optional(else_branch)? {
                    signal @ Flow::Signal(_) => Ok(signal),
                    Flow::Normal(_) => Ok(Flow::unit()),
                }
            }
            LoopExit::Broken(value) => {
                tracing::trace!(label, "loop broken");
                Ok(Flow::Normal(value))
            }
            LoopExit::Propagated(flow) => Ok(flow),
        }
    }

    fn loop_bound(&mut self, var: &str, expr: ExprId) -> Result<Number, BugError> {
        match self.eval_expr(expr)? {
            Value::Number(n) if !n.is_nan() => Ok(n),
            _ => Err(loop_bounds_not_numeric(var)),
        }
    }
}
