//! The `run` command: evaluate a Naftah source file.

use naftah_eval::{Interpreter, Value};

use super::{interpreter_config, read_file};

/// Run a source file in a fresh interpreter.
///
/// The program's final value is printed unless it is `لاشيء`. An error is
/// printed to stderr and the process exits with status 1.
pub fn run_file(path: &str) {
    let source = read_file(path);
    let mut interpreter = Interpreter::with_config(interpreter_config());

    tracing::debug!(path, bytes = source.len(), "running file");
    match interpreter.eval_source(&source) {
        Ok(Value::None) => {}
        Ok(value) => println!("{}", value.render(interpreter.number_style())),
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    }
}
