//! Variable and function scopes for Naftah programs.
//!
//! A stack of scope frames, each holding variables and functions with a
//! parent reference for lexical lookup. Blocks, loop bodies and try arms
//! push a frame over the current one; a function call starts a fresh stack
//! whose only ancestor is the global frame, so callees see globals (and
//! themselves, for recursion) but never their caller's locals.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use naftah_diagnostic::{
    function_redeclared, immutable_assignment, type_mismatch, unresolved_name,
    variable_redeclared, BugError,
};
use naftah_ir::TypeName;

use crate::value::{FunctionValue, Lookup, Value, Width};

/// `متغير` bindings can be reassigned, `ثابت` ones cannot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `متغير`.
    Mutable,
    /// `ثابت`.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why `Scope::assign` refused a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable exists but is constant.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
}

/// A variable as stored in a frame or an object field.
#[derive(Clone, Debug)]
pub struct DeclaredVariable {
    pub value: Value,
    pub mutability: Mutability,
    /// Declared type, enforced on every write.
    pub declared_type: Option<TypeName>,
}

impl DeclaredVariable {
    pub fn new(value: Value, mutability: Mutability, declared_type: Option<TypeName>) -> Self {
        DeclaredVariable {
            value,
            mutability,
            declared_type,
        }
    }
}

/// Check `value` against a declared type, converting numbers to the
/// declared width. `None` is accepted by every type.
pub fn coerce_declared(
    name: &str,
    declared: Option<TypeName>,
    value: Value,
) -> Result<Value, BugError> {
    let Some(ty) = declared else {
        return Ok(value);
    };
    let accepted = match (ty, &value) {
        (TypeName::Any, _) | (_, Value::None) => return Ok(value),
        (ty, Value::Number(n)) if ty.is_numeric() => {
            if let Some(converted) = Width::from_type(ty).and_then(|w| n.convert_to(w)) {
                return Ok(Value::Number(converted));
            }
            false
        }
        (ty, Value::NaN) => ty.is_numeric(),
        (TypeName::Bool, Value::Bool(_))
        | (TypeName::Char, Value::Char(_))
        | (TypeName::Str, Value::Str(_))
        | (TypeName::List, Value::List(_))
        | (TypeName::Tuple, Value::Tuple(_))
        | (TypeName::Set, Value::Set(_))
        | (TypeName::Map, Value::Map(_)) => true,
        _ => false,
    };
    if accepted {
        Ok(value)
    } else {
        Err(type_mismatch(name, ty.spelling(), value.type_name()))
    }
}

/// Shared handle to a scope; the environment and child scopes hold clones.
///
/// All scope allocations go through [`LocalScope::new`]; `Rc` keeps frames
/// cheap and makes it explicit that scopes never cross threads.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame: variables and functions live in separate namespaces.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, DeclaredVariable>,
    functions: FxHashMap<String, Rc<FunctionValue>>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    /// Declare a variable in this frame. Shadowing an outer frame is fine;
    /// a second declaration in the same frame is not.
    pub fn declare(&mut self, name: &str, variable: DeclaredVariable) -> Result<(), BugError> {
        if self.bindings.contains_key(name) {
            return Err(variable_redeclared(name));
        }
        self.bindings.insert(name.to_owned(), variable);
        Ok(())
    }

    pub fn declare_function(&mut self, function: Rc<FunctionValue>) -> Result<(), BugError> {
        let name = function.decl.name.clone();
        if self.functions.contains_key(&name) {
            return Err(function_redeclared(&name));
        }
        self.functions.insert(name, function);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<Rc<FunctionValue>> {
        if let Some(function) = self.functions.get(name) {
            return Some(Rc::clone(function));
        }
        self.parent.as_ref()?.borrow().lookup_function(name)
    }

    /// Declared type of the nearest binding named `name`.
    fn declared_type(&self, name: &str) -> Option<Option<TypeName>> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.declared_type);
        }
        self.parent.as_ref()?.borrow().declared_type(name)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// Scope stack of one running program, rooted at the global scope.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Declare in the current frame, checking the value against `ty`.
    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        mutability: Mutability,
        ty: Option<TypeName>,
    ) -> Result<(), BugError> {
        let value = coerce_declared(name, ty, value)?;
        self.current_scope()
            .borrow_mut()
            .declare(name, DeclaredVariable::new(value, mutability, ty))
    }

    pub fn declare_function(&mut self, function: Rc<FunctionValue>) -> Result<(), BugError> {
        tracing::trace!(name = %function.decl.name, depth = self.depth(), "declare function");
        self.current_scope().borrow_mut().declare_function(function)
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<Rc<FunctionValue>> {
        self.current_scope().borrow().lookup_function(name)
    }

    /// Reassign the nearest binding named `name`, enforcing its
    /// mutability and declared type.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), BugError> {
        let scope = self.current_scope();
        let declared = scope.borrow().declared_type(name);
        let value = match declared {
            Some(ty) => coerce_declared(name, ty, value)?,
            None => return Err(unresolved_name(name)),
        };
        scope
            .borrow_mut()
            .assign(name, value)
            .map_err(|error| match error {
                AssignError::Immutable => immutable_assignment(name),
                AssignError::Undefined => unresolved_name(name),
            })
    }

    /// Resolve `a:b:c`: the head through the scope chain, every further
    /// segment as a field of the previous value. `None` if any segment is
    /// absent.
    pub fn resolve_path(&self, segments: &[&str]) -> Option<Value> {
        let (head, rest) = segments.split_first()?;
        let mut value = self.lookup(head)?;
        for segment in rest {
            value = match value.field(segment) {
                Ok(Lookup::Found(next)) => next,
                _ => return None,
            };
        }
        Some(value)
    }

    /// A fresh stack for a function call: the global frame only.
    #[must_use]
    pub fn child(&self) -> Self {
        let global = self.global.clone();
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
