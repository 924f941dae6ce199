//! Binary and unary operators.
//!
//! Scalar and element-wise arithmetic are distinct operators, as are the
//! prefix and postfix forms of increment and decrement.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Element-wise arithmetic
    ElementAdd,
    ElementSub,
    ElementMul,
    ElementDiv,
    ElementMod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    // Other
    Coalesce,
}

impl BinaryOp {
    /// Source-level symbol, used in diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::ElementAdd => "<+>",
            Self::ElementSub => "<->",
            Self::ElementMul => "<*>",
            Self::ElementDiv => "</>",
            Self::ElementMod => "<%>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "و",
            Self::Or => "أو",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Coalesce => "؟؟",
        }
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Pow
        )
    }

    pub const fn is_elementwise(self) -> bool {
        matches!(
            self,
            Self::ElementAdd
                | Self::ElementSub
                | Self::ElementMul
                | Self::ElementDiv
                | Self::ElementMod
        )
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(
            self,
            Self::BitAnd | Self::BitOr | Self::BitXor | Self::Shl | Self::Shr
        )
    }

    /// The scalar operator an element-wise operator applies pairwise to
    /// collection elements and string code points.
    pub const fn scalar(self) -> Self {
        match self {
            Self::ElementAdd => Self::Add,
            Self::ElementSub => Self::Sub,
            Self::ElementMul => Self::Mul,
            Self::ElementDiv => Self::Div,
            Self::ElementMod => Self::Mod,
            other => other,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "ليس",
            Self::BitNot => "~",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        }
    }

    /// Increment or decrement, in either position.
    pub const fn is_step(self) -> bool {
        matches!(
            self,
            Self::PreIncrement | Self::PreDecrement | Self::PostIncrement | Self::PostDecrement
        )
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }
}
