//! Naftah Diagnostic - the single structured error of the Naftah toolchain.
//!
//! Every failure, from an unrecognised character in the lexer to a division
//! by zero deep inside a user function, surfaces as one [`BugError`]: an
//! [`ErrorKind`] for programmatic matching, a localised human-readable
//! message, and the source position where it happened when known.
//!
//! Errors are built through the `#[cold]` factory functions re-exported
//! here (`division_by_zero()`, `unresolved_name(..)`, ...) and located with
//! [`BugError::at`]. None of them is ever used for ordinary control flow.

mod error;
mod factories;

pub use error::{BugError, ErrorKind};
pub use factories::*;

/// Result alias used across the workspace.
pub type BugResult<T> = Result<T, BugError>;
