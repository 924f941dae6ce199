//! Naftah Eval - tree-walking evaluator for Naftah programs.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: lexical scopes as a parent-linked chain, plus a
//!   separate function table per scope
//! - `evaluate_binary`: direct enum-based binary operator dispatch
//! - `evaluate_unary` / `step_value`: unary operators and `زد`/`نقص`
//! - `Flow`: statement outcomes, where break/continue/return travel as
//!   signals instead of values
//! - `Interpolator`: `${...}` expansion inside string literals
//! - `InteropBoundary`: the seam to a host runtime for qualified calls
//! - `PrintHandler`: where `إطبع` writes (stdout, a buffer, or nowhere)
//!
//! The entry point is [`Interpreter`]; a host configures it with an
//! [`InterpreterConfig`] and feeds it source text or a parsed program.

mod builtins;
mod config;
mod environment;
mod interop;
mod interpolate;
pub mod interpreter;
mod operators;
mod print_handler;
mod signal;
mod unary_operators;
mod value;

#[cfg(test)]
mod tests;

pub use builtins::{builtins, lookup_builtin, BuiltinContext, BuiltinFn, BuiltinFunction};
pub use config::InterpreterConfig;
pub use environment::{
    coerce_declared, AssignError, DeclaredVariable, Environment, LocalScope, Mutability, Scope,
};
pub use interop::{ForeignObject, InteropBoundary, MemberHandle, NoInterop, SharedInterop};
pub use interpolate::{
    has_placeholder, strip_quotes, InterpolationContext, Interpolator, MissingKeyPolicy,
};
pub use interpreter::{Interpreter, ScopedInterpreter};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use signal::{loop_action, Flow, LoopAction, LoopSignal, SignalKind};
pub use unary_operators::{evaluate_unary, step_value};
pub use value::{
    char_of, FunctionValue, Heap, Lookup, Number, NumberStyle, Value, Width, NAN_MARKER,
    NULL_MARKER,
};
