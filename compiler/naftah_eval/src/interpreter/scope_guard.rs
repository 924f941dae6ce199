//! RAII scope guards for the interpreter's environment.
//!
//! [`ScopedInterpreter`] holds `&mut Interpreter` and pops the scope it
//! pushed when dropped, so an early `?` return from a block, loop body or
//! try arm can never leave a stray frame behind. The guard derefs to the
//! interpreter, which avoids the borrow conflict a guard over
//! `&mut Environment` alone would cause.
//!
//! ```text
//! self.with_binding(name, value, Mutability::Mutable, |scoped| {
//!     scoped.exec_stmt(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use naftah_diagnostic::BugError;

use super::Interpreter;
use crate::environment::Mutability;
use crate::value::Value;

/// Guard that pops the environment scope on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a scope that lives as long as the returned guard.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` in a fresh scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` in a fresh scope that already binds `name`.
    pub fn with_binding<T, F>(
        &mut self,
        name: &str,
        value: Value,
        mutability: Mutability,
        f: F,
    ) -> Result<T, BugError>
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> Result<T, BugError>,
    {
        self.with_env_scope(|scoped| {
            scoped.env.declare(name, value, mutability, None)?;
            f(scoped)
        })
    }
}
