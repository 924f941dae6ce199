//! Destination of `إطبع`.
//!
//! Scripts and the REPL print to stdout; tests and embedders capture into a
//! buffer and read it back; a silent sink discards everything.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed text goes.
#[derive(Debug)]
pub enum PrintHandler {
    Stdout,
    /// Accumulates output until taken or cleared.
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Print a line (with newline).
    pub fn println(&self, text: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout (piped into `head`) is not a script error.
                let _ = writeln!(out, "{text}");
            }
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(text);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Print without newline.
    pub fn print(&self, text: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = write!(out, "{text}");
                let _ = out.flush();
            }
            PrintHandler::Buffer(buffer) => buffer.lock().push_str(text),
            PrintHandler::Silent => {}
        }
    }

    /// Captured output so far. Empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Captured output, leaving the buffer empty.
    pub fn take_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => std::mem::take(&mut *buffer.lock()),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared between the interpreter and whoever reads the
/// captured output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests;
