//! Line REPL over one persistent interpreter.
//!
//! Lines accumulate while braces are unbalanced, so a function or loop
//! body can be typed across several lines. Each complete chunk is parsed
//! and evaluated on its own; declarations persist between chunks and an
//! error never ends the session.

use std::io::{self, BufRead, Write};

use naftah_diagnostic::BugError;
use naftah_eval::{Interpreter, Value};

/// Typed alone on a line, ends the session.
pub const QUIT_COMMAND: &str = ":خروج";

const PROMPT: &str = "نفطة> ";
const CONTINUATION_PROMPT: &str = "...   ";

/// What feeding one line produced.
#[derive(Debug)]
pub enum ReplStep {
    /// The chunk is still open; more lines are needed.
    Incomplete,
    /// Evaluated to `لاشيء`, or the line was blank.
    Silent,
    /// Evaluated to a value, already rendered.
    Value(String),
    Error(BugError),
    Quit,
}

pub struct Repl {
    interpreter: Interpreter,
    pending: String,
}

impl Repl {
    pub fn new(interpreter: Interpreter) -> Self {
        Repl {
            interpreter,
            pending: String::new(),
        }
    }

    /// Whether earlier lines are waiting for their closing brace.
    pub fn is_continuing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn feed(&mut self, line: &str) -> ReplStep {
        if !self.is_continuing() {
            let trimmed = line.trim();
            if trimmed == QUIT_COMMAND {
                return ReplStep::Quit;
            }
            if trimmed.is_empty() {
                return ReplStep::Silent;
            }
        }

        self.pending.push_str(line);
        self.pending.push('\n');
        if brace_depth(&self.pending) > 0 {
            return ReplStep::Incomplete;
        }
        self.flush()
    }

    /// Evaluate whatever is pending, balanced or not.
    pub fn flush(&mut self) -> ReplStep {
        let chunk = std::mem::take(&mut self.pending);
        if chunk.trim().is_empty() {
            return ReplStep::Silent;
        }
        match self.interpreter.eval_source(&chunk) {
            Ok(Value::None) => ReplStep::Silent,
            Ok(value) => ReplStep::Value(value.render(self.interpreter.number_style())),
            Err(err) => ReplStep::Error(err),
        }
    }
}

/// Net count of `{` over `}` in `source`, ignoring string and character
/// literals and comments.
pub fn brace_depth(source: &str) -> i64 {
    let mut depth = 0i64;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            '"' | '\'' | '«' => {
                let close = if c == '«' { '»' } else { c };
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        chars.next();
                    } else if inner == close {
                        break;
                    }
                }
            }
            '#' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for inner in chars.by_ref() {
                    if previous == '*' && inner == '#' {
                        break;
                    }
                    previous = inner;
                }
            }
            '#' => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    depth
}

/// Drive `repl` from `input` until EOF or the quit command.
///
/// Values go to `out`; errors go to `err`. Prompts are written to `out`
/// only when `interactive` is set.
pub fn run_repl(
    repl: &mut Repl,
    input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
    interactive: bool,
) -> io::Result<()> {
    if interactive {
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        match repl.feed(&line) {
            ReplStep::Quit => return Ok(()),
            step => report(step, &mut out, &mut err)?,
        }
        if interactive {
            let prompt = if repl.is_continuing() {
                CONTINUATION_PROMPT
            } else {
                PROMPT
            };
            write!(out, "{prompt}")?;
            out.flush()?;
        }
    }

    if repl.is_continuing() {
        let step = repl.flush();
        report(step, &mut out, &mut err)?;
    }
    if interactive {
        writeln!(out)?;
    }
    Ok(())
}

fn report(step: ReplStep, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    match step {
        ReplStep::Value(text) => writeln!(out, "{text}"),
        ReplStep::Error(error) => {
            tracing::debug!(kind = ?error.kind, "repl chunk failed");
            writeln!(err, "{error}")
        }
        ReplStep::Incomplete | ReplStep::Silent | ReplStep::Quit => Ok(()),
    }
}
