//! Command handlers for the `naftah` binary.
//!
//! Shared pieces (reading a source file, building the interpreter
//! configuration from the environment) live here in the module root.

mod debug;
mod repl;
mod run;

pub use debug::{lex_file, parse_file};
pub use repl::{brace_depth, run_repl, Repl, ReplStep, QUIT_COMMAND};
pub use run::run_file;

use naftah_eval::{InterpreterConfig, MissingKeyPolicy};

/// Environment variable selecting the interpolation missing-key policy.
pub const MISSING_KEY_VAR: &str = "NAFTAH_MISSING_KEY";

/// Build the interpreter configuration for a terminal session.
///
/// Prints go to stdout. An unrecognised `NAFTAH_MISSING_KEY` is reported
/// and the default policy is kept.
pub fn interpreter_config() -> InterpreterConfig {
    let config = InterpreterConfig::default();
    match std::env::var(MISSING_KEY_VAR) {
        Ok(name) => match MissingKeyPolicy::from_name(&name) {
            Some(policy) => config.missing_key(policy),
            None => {
                eprintln!("تحذير: قيمة غير معروفة لـ {MISSING_KEY_VAR}: '{name}' (المتاح: null، verbatim)");
                config
            }
        },
        Err(_) => config,
    }
}

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("لا يمكن العثور على الملف '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("لا توجد صلاحية لقراءة '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' يحتوي على بيانات UTF-8 غير صالحة")
                }
                _ => format!("خطأ في قراءة '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
