//! Boundary to a host platform.
//!
//! Qualified calls (`أ::ب::ت(...)`) and operators applied to host objects
//! leave the evaluator through [`InteropBoundary`]. The boundary owns every
//! conversion between host values and [`Value`]; the evaluator only ever
//! sees opaque [`ForeignObject`] handles.

use std::rc::Rc;

use naftah_diagnostic::BugError;

use crate::value::Value;

/// A resolved host member: an id meaningful to the boundary that issued
/// it, plus the alias it was resolved from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberHandle {
    id: u64,
    alias: String,
}

impl MemberHandle {
    pub fn new(id: u64, alias: impl Into<String>) -> Self {
        MemberHandle {
            id,
            alias: alias.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// Opaque host object handed back by [`InteropBoundary::invoke`].
#[derive(Clone, Debug)]
pub struct ForeignObject {
    pub id: u64,
    pub type_name: Rc<str>,
}

impl ForeignObject {
    pub fn new(id: u64, type_name: impl Into<Rc<str>>) -> Self {
        ForeignObject {
            id,
            type_name: type_name.into(),
        }
    }
}

/// Identity: two handles are equal when they name the same host object.
impl PartialEq for ForeignObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Member resolution and invocation on the host side.
///
/// Operators on foreign operands resolve the operator symbol itself
/// (`"+"`, `"<<"`, ...) and invoke it with the left operand as receiver.
pub trait InteropBoundary {
    fn resolve_alias(&self, alias: &str) -> Option<MemberHandle>;

    fn invoke(
        &self,
        handle: &MemberHandle,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> Result<Value, BugError>;
}

/// A boundary that resolves nothing. The default for embeddings without a
/// host platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInterop;

impl InteropBoundary for NoInterop {
    fn resolve_alias(&self, _alias: &str) -> Option<MemberHandle> {
        None
    }

    fn invoke(
        &self,
        handle: &MemberHandle,
        _receiver: Option<&Value>,
        _args: &[Value],
    ) -> Result<Value, BugError> {
        Err(naftah_diagnostic::foreign_member_not_found(handle.alias()))
    }
}

/// Shared boundary held by the interpreter configuration.
pub type SharedInterop = Rc<dyn InteropBoundary>;

