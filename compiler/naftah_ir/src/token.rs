//! Tokens produced by the lexer.
//!
//! Keyword synonyms are already collapsed here: every surface spelling of a
//! keyword maps to one [`TokenKind`], so the parser never sees the text that
//! was actually written.

use std::fmt;

use crate::{Position, Span};

/// A numeric literal after numeral-script normalisation.
///
/// `digits` holds ASCII characters only: decimal digits with at most one
/// `.` for decimals, or `0-9a-z` for radix literals.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumberLit {
    pub digits: String,
    pub radix: u32,
    pub is_decimal: bool,
}

impl NumberLit {
    pub fn decimal(digits: impl Into<String>) -> Self {
        let digits = digits.into();
        let is_decimal = digits.contains('.');
        NumberLit {
            digits,
            radix: 10,
            is_decimal,
        }
    }

    pub fn radix(digits: impl Into<String>, radix: u32) -> Self {
        NumberLit {
            digits: digits.into(),
            radix,
            is_decimal: false,
        }
    }
}

impl fmt::Display for NumberLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.radix == 10 {
            write!(f, "{}", self.digits)
        } else {
            write!(f, "{}'{}'", self.digits, self.radix)
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Number(NumberLit),
    Str(String),
    Char(char),
    Ident(String),

    // Declarations
    Var,
    Const,
    Assign,
    Function,

    // Conditionals
    If,
    Then,
    ElseIf,
    Else,
    End,

    // Loops
    For,
    To,
    DownTo,
    Step,
    Do,
    In,
    While,
    Repeat,
    Until,
    Break,
    Continue,
    Return,

    // Try / case
    Try,
    Ok,
    Err,
    Some,
    NoneArm,
    Case,
    Among,

    // Literal keywords
    True,
    False,
    Null,
    NaN,
    Raw,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,
    ElementPlus,
    ElementMinus,
    ElementStar,
    ElementSlash,
    ElementPercent,

    // Comparison and logic
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Not,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Punctuation
    Question,
    QuestionQuestion,
    Arrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Separator,
    Colon,
    PathSep,

    Eof,
}

impl TokenKind {
    /// Short description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("الرقم '{n}'"),
            TokenKind::Str(s) => format!("النص \"{s}\""),
            TokenKind::Char(c) => format!("الحرف '{c}'"),
            TokenKind::Ident(name) => format!("المعرف '{name}'"),
            TokenKind::Eof => "نهاية الملف".to_string(),
            other => format!("'{}'", other.spelling()),
        }
    }

    /// Canonical spelling of a fixed token.
    pub const fn spelling(&self) -> &'static str {
        match self {
            TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::Char(_) | TokenKind::Ident(_) => {
                ""
            }
            TokenKind::Var => "متغير",
            TokenKind::Const => "ثابت",
            TokenKind::Assign => "تعيين",
            TokenKind::Function => "دالة",
            TokenKind::If => "إذا",
            TokenKind::Then => "إذن",
            TokenKind::ElseIf => "غير_ذلك_إذا",
            TokenKind::Else => "غير_ذلك",
            TokenKind::End => "أنهي",
            TokenKind::For => "كرر_حلقة",
            TokenKind::To => "إلى",
            TokenKind::DownTo => "تنازليا",
            TokenKind::Step => "خطوة",
            TokenKind::Do => "إفعل",
            TokenKind::In => "في",
            TokenKind::While => "بينما",
            TokenKind::Repeat => "كرر",
            TokenKind::Until => "حتى",
            TokenKind::Break => "اكسر",
            TokenKind::Continue => "تابع",
            TokenKind::Return => "ارجع",
            TokenKind::Try => "حاول",
            TokenKind::Ok => "نجاح",
            TokenKind::Err => "فشل",
            TokenKind::Some => "بعض",
            TokenKind::NoneArm => "معدوم",
            TokenKind::Case => "اختر",
            TokenKind::Among => "من_بين",
            TokenKind::True => "صحيح",
            TokenKind::False => "خطأ",
            TokenKind::Null => "لاشيء",
            TokenKind::NaN => "ليس_رقم",
            TokenKind::Raw => "خام",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::StarStar => "**",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::ElementPlus => "<+>",
            TokenKind::ElementMinus => "<->",
            TokenKind::ElementStar => "<*>",
            TokenKind::ElementSlash => "</>",
            TokenKind::ElementPercent => "<%>",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::And => "و",
            TokenKind::Or => "أو",
            TokenKind::Not => "ليس",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::Question => "؟",
            TokenKind::QuestionQuestion => "؟؟",
            TokenKind::Arrow => "->",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Separator => "،",
            TokenKind::Colon => ":",
            TokenKind::PathSep => "::",
            TokenKind::Eof => "",
        }
    }

    /// Same variant, ignoring payloads.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A token with its byte span and the line/column where it starts.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub position: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Token {
            kind,
            span,
            position,
        }
    }

    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
            position: Position::default(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.position)
    }
}

/// Lexer output: a token vector always terminated by [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.tokens.iter().map(|t| &t.kind)
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
