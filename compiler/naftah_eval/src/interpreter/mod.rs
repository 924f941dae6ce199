//! Tree-walking interpreter for Naftah.
//!
//! # Architecture
//!
//! Statements evaluate to a [`Flow`]; expressions evaluate to a [`Value`].
//! Both go through `ensure_sufficient_stack`, so deeply nested sources and
//! deep user recursion grow the native stack instead of overflowing it.
//!
//! - `stmt.rs` - declarations, assignment, conditionals, case, try, jumps
//! - `loops.rs` - counted, for-each, while and repeat loops
//! - `expr.rs` - literals, names, access chains, operators, collections
//! - `call.rs` - user functions, builtins and foreign calls
//! - `scope_guard.rs` - RAII scopes
//!
//! # Arenas
//!
//! Every `ExprId`/`StmtId` is only meaningful in the arena it was parsed
//! into. The interpreter evaluates against `self.arena`; a call swaps in
//! the callee's arena (held by its [`FunctionValue`](crate::FunctionValue))
//! for the duration of the call, which is what lets a REPL line call a
//! function declared on an earlier line.

mod call;
mod expr;
mod loops;
mod scope_guard;
mod stmt;

pub use scope_guard::ScopedInterpreter;

use naftah_diagnostic::{signal_outside_loop, BugError};
use naftah_ir::{Program, SharedArena, StmtId};
use naftah_parse::parse_source;

use crate::config::InterpreterConfig;
use crate::environment::Environment;
use crate::interop::SharedInterop;
use crate::interpolate::Interpolator;
use crate::print_handler::SharedPrintHandler;
use crate::signal::{Flow, SignalKind};
use crate::value::{NumberStyle, Value};

/// Evaluates programs against one persistent global environment.
pub struct Interpreter {
    pub(crate) env: Environment,
    arena: SharedArena,
    print: SharedPrintHandler,
    interop: SharedInterop,
    interpolator: Interpolator,
    style: NumberStyle,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Interpreter {
            env: Environment::new(),
            arena: SharedArena::default(),
            print: config.print,
            interop: config.interop,
            interpolator: Interpolator::new(config.missing_key).with_style(config.number_style),
            style: config.number_style,
        }
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn number_style(&self) -> NumberStyle {
        self.style
    }

    /// Parse and evaluate `source` in the global environment.
    pub fn eval_source(&mut self, source: &str) -> Result<Value, BugError> {
        let program = parse_source(source)?;
        self.eval_program(&program)
    }

    /// Evaluate a program's top-level statements in order.
    ///
    /// The result is the value of the last statement, or the payload of a
    /// top-level `ارجع`, which ends the program early.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn eval_program(&mut self, program: &Program) -> Result<Value, BugError> {
        let caller_arena = std::mem::replace(&mut self.arena, program.arena.clone());
        let result = self.run_top_level(&program.body);
        self.arena = caller_arena;
        result
    }

    fn run_top_level(&mut self, body: &[StmtId]) -> Result<Value, BugError> {
        let mut last = Value::None;
        for &id in body {
            match self.exec_stmt(id)? {
                Flow::Normal(value) => last = value,
                Flow::Signal(signal) if signal.kind == SignalKind::Return => {
                    tracing::debug!("top-level return ends the program");
                    return Ok(signal.payload);
                }
                Flow::Signal(signal) => {
                    let position = self.arena.get_stmt(id).position;
                    return Err(
                        signal_outside_loop(signal.kind.keyword(), signal.label.as_deref())
                            .at(position),
                    );
                }
            }
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
