#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

mod expressions;
mod statements;

use naftah_ir::{Expr, ExprKind, Program, Stmt, StmtKind};

use crate::parse_source;

pub(crate) fn parse_ok(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"))
}

/// The only top-level statement of `source`.
pub(crate) fn single_stmt(program: &Program) -> &Stmt {
    assert_eq!(program.body.len(), 1, "expected one statement");
    program.arena.get_stmt(program.body[0])
}

/// The expression of a one-expression program.
pub(crate) fn single_expr(program: &Program) -> &Expr {
    match &single_stmt(program).kind {
        StmtKind::Expr(id) => program.arena.get_expr(*id),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

pub(crate) fn ident_name(expr: &Expr) -> &str {
    match &expr.kind {
        ExprKind::Ident(name) => name,
        other => panic!("expected identifier, got {other:?}"),
    }
}
