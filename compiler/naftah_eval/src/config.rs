//! Interpreter configuration.

use std::fmt;
use std::rc::Rc;

use crate::interop::{NoInterop, SharedInterop};
use crate::interpolate::MissingKeyPolicy;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::NumberStyle;

/// Everything an [`Interpreter`](crate::Interpreter) takes from its host.
///
/// The default prints to stdout, resolves no foreign members, renders
/// missing interpolation keys as `لاشيء` and prints Latin digits.
#[derive(Clone)]
pub struct InterpreterConfig {
    pub missing_key: MissingKeyPolicy,
    pub print: SharedPrintHandler,
    pub interop: SharedInterop,
    pub number_style: NumberStyle,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            missing_key: MissingKeyPolicy::default(),
            print: stdout_handler(),
            interop: Rc::new(NoInterop),
            number_style: NumberStyle::default(),
        }
    }
}

impl InterpreterConfig {
    #[must_use]
    pub fn missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Route `إطبع` output through `handler`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = handler;
        self
    }

    #[must_use]
    pub fn interop(mut self, interop: SharedInterop) -> Self {
        self.interop = interop;
        self
    }

    #[must_use]
    pub fn number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = style;
        self
    }
}

impl fmt::Debug for InterpreterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterConfig")
            .field("missing_key", &self.missing_key)
            .field("print", &self.print)
            .field("number_style", &self.number_style)
            .finish_non_exhaustive()
    }
}
