use crate::{BinaryOp, ExprId, NumberLit, Position, Span, StmtId, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Line/column of the first token, for diagnostics.
    pub position: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, position: Position) -> Self {
        Expr {
            kind,
            span,
            position,
        }
    }
}

/// A call argument, positional or named (`اسم تعيين قيمة`).
#[derive(Clone, Debug, PartialEq)]
pub struct CallArg {
    pub name: Option<String>,
    pub value: ExprId,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Number(NumberLit),
    /// String literal. Non-raw strings are interpolated at evaluation time.
    Str {
        text: String,
        raw: bool,
    },
    Char(char),
    Bool(bool),
    Null,
    NaN,

    Ident(String),

    /// `receiver:name`. `optional` is set by a preceding `؟`, which lets a
    /// missing receiver segment collapse the whole chain to `None`.
    Field {
        receiver: ExprId,
        name: String,
        optional: bool,
    },
    /// `receiver[index]`, optionally `receiver؟[index]`.
    Index {
        receiver: ExprId,
        index: ExprId,
        optional: bool,
    },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Ternary {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// Call of a name or a qualified name.
    Call {
        callee: ExprId,
        args: Vec<CallArg>,
    },
    /// `a::b::c(args)`: forwarded to the interop boundary by alias.
    ForeignCall {
        path: Vec<String>,
        args: Vec<CallArg>,
    },

    Tuple(Vec<ExprId>),
    List(Vec<ExprId>),
    Set(Vec<ExprId>),
    Map(Vec<(ExprId, ExprId)>),
    /// `{متغير أ تعيين 1، ...}`: each entry is a declaration statement.
    Object(Vec<StmtId>),
}

impl ExprKind {
    /// Whether the expression names a storage location that increment,
    /// decrement and assignment can write back to.
    pub fn is_place(&self) -> bool {
        matches!(
            self,
            ExprKind::Ident(_) | ExprKind::Field { .. } | ExprKind::Index { .. }
        )
    }
}
