use crate::{ExprId, Position, Span, StmtId, TypeName};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    pub position: Position,
    /// `الخارجي:` written before a loop or block.
    pub label: Option<String>,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span, position: Position) -> Self {
        Stmt {
            kind,
            span,
            position,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub mutable: bool,
    pub ty: Option<TypeName>,
    pub default: Option<ExprId>,
    pub span: Span,
}

impl Param {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeName>,
    /// Always a `StmtKind::Block`.
    pub body: StmtId,
}

/// `نجاح(أ) -> ...`, `فشل(ب) إفعل ...`, `بعض(أ) -> ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct TryArm {
    pub binding: String,
    pub body: StmtId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TryKind {
    Result { ok: TryArm, err: TryArm },
    Option { some: TryArm, none: StmtId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseArm {
    pub labels: Vec<ExprId>,
    pub body: StmtId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `متغير أ، ب : عدد_صحيح تعيين 1، 2`. `values` may be empty, hold one
    /// value shared by every name, or one value per name.
    Declare {
        mutable: bool,
        names: Vec<String>,
        ty: Option<TypeName>,
        values: Vec<ExprId>,
    },
    Assign {
        target: ExprId,
        value: ExprId,
    },
    Function(FunctionDecl),
    If {
        branches: Vec<(ExprId, StmtId)>,
        else_branch: Option<StmtId>,
    },
    ForRange {
        var: String,
        start: ExprId,
        end: ExprId,
        step: Option<ExprId>,
        descending: bool,
        body: StmtId,
        else_branch: Option<StmtId>,
    },
    ForEach {
        var: String,
        iterable: ExprId,
        body: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    Repeat {
        body: StmtId,
        until: ExprId,
    },
    Case {
        subject: ExprId,
        arms: Vec<CaseArm>,
        else_branch: Option<StmtId>,
    },
    Try {
        subject: ExprId,
        kind: TryKind,
    },
    Break(Option<String>),
    Continue(Option<String>),
    /// Several values return a tuple; none returns `None`.
    Return(Vec<ExprId>),
    Block(Vec<StmtId>),
    Expr(ExprId),
}

