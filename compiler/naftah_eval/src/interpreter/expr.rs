//! Expression evaluation.

use naftah_diagnostic::{
    invalid_assignment_target, invalid_value, unresolved_name, variable_redeclared, BugError,
};
use naftah_ir::{BinaryOp, Expr, ExprId, ExprKind, StmtId, StmtKind, UnaryOp};
use naftah_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::builtins::lookup_builtin;
use crate::environment::{coerce_declared, DeclaredVariable, Mutability};
use crate::operators::evaluate_binary;
use crate::unary_operators::{evaluate_unary, step_value};
use crate::value::{Lookup, Number, Value};

/// One segment of an access chain.
enum Member<'e> {
    Field(&'e str),
    Index(ExprId),
}

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, id: ExprId) -> Result<Value, BugError> {
        ensure_sufficient_stack(|| {
            let arena = self.arena.clone();
            let expr = arena.get_expr(id);
            self.eval_expr_inner(id, expr).map_err(|e| e.at(expr.position))
        })
    }

    pub(crate) fn eval_exprs(&mut self, ids: &[ExprId]) -> Result<Vec<Value>, BugError> {
        ids.iter().map(|&id| self.eval_expr(id)).collect()
    }

    fn eval_expr_inner(&mut self, id: ExprId, expr: &Expr) -> Result<Value, BugError> {
        match &expr.kind {
            ExprKind::Number(lit) => Number::from_literal(lit).map(Value::number),
            ExprKind::Str { text, raw: true } => Ok(Value::string(text.as_str())),
            ExprKind::Str { text, raw: false } => {
                Ok(Value::string(self.interpolator.expand(text, &self.env)))
            }
            ExprKind::Char(c) => Value::char(*c),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::None),
            ExprKind::NaN => Ok(Value::NaN),
            ExprKind::Ident(name) => self.resolve_name(name),
            ExprKind::Field { .. } | ExprKind::Index { .. } => {
                Ok(self.eval_access(id)?.unwrap_or(Value::None))
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, *operand),
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(*cond)?.is_truthy() {
                    self.eval_expr(*then_branch)
                } else {
                    self.eval_expr(*else_branch)
                }
            }
            ExprKind::Call { callee, args } => self.eval_call(*callee, args),
            ExprKind::ForeignCall { path, args } => self.eval_foreign_call(path, args),
            ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_exprs(items)?)),
            ExprKind::List(items) => Ok(Value::list(self.eval_exprs(items)?)),
            ExprKind::Set(items) => Ok(Value::set(self.eval_exprs(items)?)),
            ExprKind::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for &(key, value) in entries {
                    pairs.push((self.eval_expr(key)?, self.eval_expr(value)?));
                }
                Ok(Value::map(pairs))
            }
            ExprKind::Object(fields) => self.eval_object(fields),
        }
    }

    /// Variables shadow functions, which shadow builtins.
    fn resolve_name(&self, name: &str) -> Result<Value, BugError> {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        if let Some(function) = self.env.lookup_function(name) {
            return Ok(Value::Function(function));
        }
        lookup_builtin(name)
            .map(Value::Builtin)
            .ok_or_else(|| unresolved_name(name))
    }

    /// Evaluate an access chain. `Ok(None)` means an optional segment
    /// (`؟:` or `؟[]`) met an absent receiver or a missing member, which
    /// short-circuits the rest of the chain.
    fn eval_access(&mut self, id: ExprId) -> Result<Option<Value>, BugError> {
        let arena = self.arena.clone();
        let expr = arena.get_expr(id);
        let (receiver, optional, member) = match &expr.kind {
            ExprKind::Field {
                receiver,
                name,
                optional,
            } => (*receiver, *optional, Member::Field(name)),
            ExprKind::Index {
                receiver,
                index,
                optional,
            } => (*receiver, *optional, Member::Index(*index)),
            _ => return self.eval_expr(id).map(Some),
        };
        let Some(base) = self.eval_access(receiver)? else {
            return Ok(None);
        };
        if optional && matches!(base, Value::None) {
            return Ok(None);
        }
        let lookup = match member {
            Member::Field(name) => base.field(name)?,
            Member::Index(index) => {
                let key = self.eval_expr(index)?;
                base.index(&key)?
            }
        };
        match lookup {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Missing(_) if optional => Ok(None),
            Lookup::Missing(error) => Err(error.at(expr.position)),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> Result<Value, BugError> {
        let left = self.eval_expr(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => return Ok(left),
            BinaryOp::Or if left.is_truthy() => return Ok(left),
            BinaryOp::Coalesce if !left.is_sentinel() => return Ok(left),
            BinaryOp::And | BinaryOp::Or | BinaryOp::Coalesce => return self.eval_expr(right),
            _ => {}
        }
        let right = self.eval_expr(right)?;
        evaluate_binary(left, right, op, &*self.interop)
    }

    /// Increment and decrement write back when the operand is a place;
    /// on any other operand they only compute.
    fn eval_unary(&mut self, op: UnaryOp, operand: ExprId) -> Result<Value, BugError> {
        let is_place = self.arena.get_expr(operand).kind.is_place();
        let value = self.eval_expr(operand)?;
        if !(op.is_step() && is_place) {
            return evaluate_unary(value, op);
        }
        let delta = match op {
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => 1,
            _ => -1,
        };
        let stepped = step_value(&value, delta, op)?;
        self.assign_place(operand, stepped.clone())?;
        Ok(if op.is_postfix() { value } else { stepped })
    }

    /// Write `value` to the storage `target` names.
    pub(crate) fn assign_place(&mut self, target: ExprId, value: Value) -> Result<(), BugError> {
        let arena = self.arena.clone();
        let expr = arena.get_expr(target);
        let written = match &expr.kind {
            ExprKind::Ident(name) => self.env.assign(name, value),
            ExprKind::Field { receiver, name, .. } => {
                let base = self.eval_expr(*receiver)?;
                base.set_field(name, value)
            }
            ExprKind::Index {
                receiver, index, ..
            } => {
                let base = self.eval_expr(*receiver)?;
                let key = self.eval_expr(*index)?;
                base.set_index(&key, value)
            }
            _ => Err(invalid_assignment_target()),
        };
        written.map_err(|e| e.at(expr.position))
    }

    fn eval_object(&mut self, fields: &[StmtId]) -> Result<Value, BugError> {
        let arena = self.arena.clone();
        let mut object: Vec<(String, DeclaredVariable)> = Vec::with_capacity(fields.len());
        for &id in fields {
            let stmt = arena.get_stmt(id);
            let StmtKind::Declare {
                mutable,
                names,
                ty,
                values,
            } = &stmt.kind
            else {
                return Err(invalid_value("عناصر الكائن يجب أن تكون تعريفات متغيرات أو ثوابت.")
                    .at(stmt.position));
            };
            let mutability = if *mutable {
                Mutability::Mutable
            } else {
                Mutability::Immutable
            };
            let values = self.eval_declared_values(names.len(), values)?;
            for (name, value) in names.iter().zip(values) {
                if object.iter().any(|(existing, _)| existing == name) {
                    return Err(variable_redeclared(name).at(stmt.position));
                }
                let value = coerce_declared(name, *ty, value)?;
                object.push((name.clone(), DeclaredVariable::new(value, mutability, *ty)));
            }
        }
        Ok(Value::object(object))
    }
}
