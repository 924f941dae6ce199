//! Evaluator tests. Operator tables are tested directly; language
//! behaviour is tested through whole programs.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

mod control_flow_tests;
mod functions_tests;

use naftah_diagnostic::{BugError, ErrorKind};

use crate::config::InterpreterConfig;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;
use crate::value::Value;

/// Evaluate `source` in a fresh interpreter whose prints are discarded.
pub(crate) fn run(source: &str) -> Value {
    run_result(source).unwrap_or_else(|e| panic!("evaluation failed for {source:?}: {e}"))
}

pub(crate) fn run_result(source: &str) -> Result<Value, BugError> {
    let config = InterpreterConfig::default().print_handler(buffer_handler());
    Interpreter::with_config(config).eval_source(source)
}

/// Evaluate `source` and return what it printed.
pub(crate) fn run_printing(source: &str) -> String {
    let handler = buffer_handler();
    let config = InterpreterConfig::default().print_handler(handler.clone());
    Interpreter::with_config(config)
        .eval_source(source)
        .unwrap_or_else(|e| panic!("evaluation failed for {source:?}: {e}"));
    handler.take_output()
}

/// Evaluate `source`, expecting it to fail with `kind`.
pub(crate) fn run_err(source: &str, kind: ErrorKind) -> BugError {
    let err = run_result(source).expect_err("evaluation should fail");
    assert!(err.is(kind), "expected {kind:?}, got {err:?}");
    err
}
