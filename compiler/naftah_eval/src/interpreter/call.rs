//! Calls: user functions, builtins and foreign members.
//!
//! Arguments are always evaluated in the caller's environment. A user
//! function body then runs on a fresh stack over the global frame, against
//! the arena it was declared in. The function's own name is bound in that
//! stack, so a function declared in a block can still call itself.

use std::rc::Rc;

use naftah_diagnostic::{
    argument_redeclared, foreign_member_not_found, missing_argument, not_callable,
    signal_outside_loop, too_many_arguments, unknown_parameter, unresolved_function, BugError,
};
use naftah_ir::{CallArg, ExprId, ExprKind};

use super::Interpreter;
use crate::builtins::{lookup_builtin, BuiltinContext, BuiltinFunction};
use crate::environment::{coerce_declared, Mutability};
use crate::signal::{Flow, SignalKind};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    pub(super) fn eval_call(&mut self, callee: ExprId, args: &[CallArg]) -> Result<Value, BugError> {
        let target = self.resolve_callee(callee)?;
        self.call_value(&target, args)
    }

    /// A bare name prefers a declared function over a variable of the same
    /// name, and both over a builtin. Anything else is evaluated.
    fn resolve_callee(&mut self, callee: ExprId) -> Result<Value, BugError> {
        let arena = self.arena.clone();
        let ExprKind::Ident(name) = &arena.get_expr(callee).kind else {
            return self.eval_expr(callee);
        };
        if let Some(function) = self.env.lookup_function(name) {
            return Ok(Value::Function(function));
        }
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        lookup_builtin(name)
            .map(Value::Builtin)
            .ok_or_else(|| unresolved_function(name))
    }

    fn call_value(&mut self, target: &Value, args: &[CallArg]) -> Result<Value, BugError> {
        match target {
            Value::Function(function) => self.call_function(function, args),
            Value::Builtin(builtin) => self.call_builtin(builtin, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    fn call_builtin(
        &mut self,
        builtin: &BuiltinFunction,
        args: &[CallArg],
    ) -> Result<Value, BugError> {
        let values = self.eval_positional(builtin.name, args)?;
        let context = BuiltinContext {
            print: &self.print,
            style: self.style,
            interop: &*self.interop,
        };
        (builtin.call)(&context, &values)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(function = %function.decl.name))]
    fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: &[CallArg],
    ) -> Result<Value, BugError> {
        let slots = self.bind_arguments(function, args)?;
        let callee_env = self.env.child();
        let caller_env = std::mem::replace(&mut self.env, callee_env);
        let caller_arena = std::mem::replace(&mut self.arena, function.arena.clone());
        let result = self.run_function(function, slots);
        self.env = caller_env;
        self.arena = caller_arena;
        result
    }

    /// Match arguments to parameter slots. Positional arguments fill slots
    /// left to right; named ones go to the parameter they name.
    fn bind_arguments(
        &mut self,
        function: &FunctionValue,
        args: &[CallArg],
    ) -> Result<Vec<Option<Value>>, BugError> {
        let decl = &function.decl;
        let mut slots: Vec<Option<Value>> = vec![None; decl.params.len()];
        let mut next_positional = 0;
        for arg in args {
            let value = self.eval_expr(arg.value)?;
            let slot = match &arg.name {
                None => {
                    if next_positional >= slots.len() {
                        return Err(too_many_arguments(&decl.name, slots.len(), args.len()));
                    }
                    next_positional += 1;
                    next_positional - 1
                }
                Some(name) => decl
                    .params
                    .iter()
                    .position(|param| &param.name == name)
                    .ok_or_else(|| unknown_parameter(&decl.name, name))?,
            };
            if slots[slot].is_some() {
                return Err(argument_redeclared(&decl.name, &decl.params[slot].name));
            }
            slots[slot] = Some(value);
        }
        Ok(slots)
    }

    /// Declare the parameters and run the body. Defaults are evaluated in
    /// the callee, so they can refer to earlier parameters.
    fn run_function(
        &mut self,
        function: &Rc<FunctionValue>,
        slots: Vec<Option<Value>>,
    ) -> Result<Value, BugError> {
        let decl = &function.decl;
        self.with_env_scope(|scoped| {
            let visible = scoped.env.lookup_function(&decl.name);
            if !visible.is_some_and(|found| Rc::ptr_eq(&found, function)) {
                scoped.env.declare_function(Rc::clone(function))?;
            }
            for (param, slot) in decl.params.iter().zip(slots) {
                let value = match (slot, param.default) {
                    (Some(value), _) => value,
                    (None, Some(default)) => scoped.eval_expr(default)?,
                    (None, None) => return Err(missing_argument(&decl.name, &param.name)),
                };
                let mutability = if param.mutable {
                    Mutability::Mutable
                } else {
                    Mutability::Immutable
                };
                scoped.env.declare(&param.name, value, mutability, param.ty)?;
            }
            match scoped.exec_stmt(decl.body)? {
                Flow::Normal(_) => Ok(Value::None),
                Flow::Signal(signal) if signal.kind == SignalKind::Return => {
                    coerce_declared(&decl.name, decl.return_type, signal.payload)
                }
                Flow::Signal(signal) => Err(signal_outside_loop(
                    signal.kind.keyword(),
                    signal.label.as_deref(),
                )),
            }
        })
    }

    /// `أ::ب::ت(...)`: resolve the joined path through the interop boundary
    /// and invoke it without a receiver.
    pub(super) fn eval_foreign_call(
        &mut self,
        path: &[String],
        args: &[CallArg],
    ) -> Result<Value, BugError> {
        let alias = path.join("::");
        let handle = self
            .interop
            .resolve_alias(&alias)
            .ok_or_else(|| foreign_member_not_found(&alias))?;
        let values = self.eval_positional(&alias, args)?;
        tracing::debug!(alias = %alias, args = values.len(), "foreign call");
        let interop = Rc::clone(&self.interop);
        interop.invoke(&handle, None, &values)
    }

    /// Evaluate arguments for a callee without named parameters.
    fn eval_positional(&mut self, callee: &str, args: &[CallArg]) -> Result<Vec<Value>, BugError> {
        args.iter()
            .map(|arg| match &arg.name {
                Some(name) => Err(unknown_parameter(callee, name)),
                None => self.eval_expr(arg.value),
            })
            .collect()
    }
}
