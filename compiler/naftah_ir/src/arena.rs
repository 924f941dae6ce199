//! Arena storage for the flat AST.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{Expr, Stmt};

/// Index into [`ExprArena`] expressions.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

/// Index into [`ExprArena`] statements.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

macro_rules! arena_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(ExprId, "e");
arena_id!(StmtId, "s");

/// Contiguous storage for every expression and statement of one parse.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size from source length; roughly one expression per 12 bytes.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 12;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            stmts: Vec::with_capacity(estimated / 3),
        }
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(u32::try_from(self.stmts.len()).unwrap_or(u32::MAX));
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` came from a different arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// # Panics
    /// Panics if `id` came from a different arena.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    #[track_caller]
    pub fn get_stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

/// Reference-counted, immutable arena shared between a program and every
/// function value created from it.
#[derive(Clone, Default)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SharedArena({} exprs, {} stmts)",
            self.0.expr_count(),
            self.0.stmt_count()
        )
    }
}

/// A parsed program: top-level statements plus the arena they index into.
#[derive(Clone, Debug)]
pub struct Program {
    pub arena: SharedArena,
    pub body: Vec<StmtId>,
}

impl Program {
    pub fn statements(&self) -> impl Iterator<Item = &Stmt> {
        self.body.iter().map(|id| self.arena.get_stmt(*id))
    }
}
