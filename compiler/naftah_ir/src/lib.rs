//! Naftah IR - shared data structures for the Naftah front end and evaluator.
//!
//! - [`Span`], [`Position`], [`LineIndex`]: source locations
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`BinaryOp`], [`UnaryOp`]: operators
//! - [`ExprArena`], [`ExprId`], [`StmtId`], [`Program`]: the flat AST

mod arena;
mod ast;
mod operators;
mod span;
mod token;

pub use arena::{ExprArena, ExprId, Program, SharedArena, StmtId};
pub use ast::{
    CallArg, CaseArm, Expr, ExprKind, FunctionDecl, Param, Stmt, StmtKind, TryArm, TryKind,
    TypeName,
};
pub use operators::{BinaryOp, UnaryOp};
pub use span::{LineIndex, Position, Span};
pub use token::{NumberLit, Token, TokenKind, TokenList};
