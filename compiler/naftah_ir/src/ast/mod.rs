//! Flat AST.
//!
//! Nodes live in an [`ExprArena`](crate::ExprArena) and refer to their
//! children through [`ExprId`](crate::ExprId) / [`StmtId`](crate::StmtId)
//! indices rather than boxes. A parsed [`Program`](crate::Program) owns its
//! arena behind a shared handle so that function values can keep their body
//! alive after the program that declared them is gone (REPL lines).

mod expr;
mod stmt;
mod types;

pub use expr::{CallArg, Expr, ExprKind};
pub use stmt::{CaseArm, FunctionDecl, Param, Stmt, StmtKind, TryArm, TryKind};
pub use types::TypeName;
