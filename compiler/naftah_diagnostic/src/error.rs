use std::fmt;

use naftah_ir::Position;

/// Error category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognised character sequence or malformed literal.
    Lexical,
    /// Grammar mismatch. Parsing stops at the first one.
    Syntax,
    /// A variable, function or field that does not exist.
    UnresolvedName,
    /// Write to a constant.
    ImmutableAssignment,
    /// Required parameter left without an argument.
    MissingArgument,
    /// Operator or declared type applied to an unsupported operand.
    TypeCoercion,
    /// Division or modulo by zero.
    Arithmetic,
    /// Failure reported by the interop boundary.
    Invocation,
    /// Second declaration of a name in the same frame.
    Redeclaration,
    IndexOutOfBounds,
    /// Operation that the value model does not define (incrementing `NaN`,
    /// a loop step of zero, a stray `break`).
    Unsupported,
    InvalidValue,
}

impl ErrorKind {
    /// Localised category title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Lexical => "خطأ في التحليل اللفظي",
            Self::Syntax => "خطأ نحوي",
            Self::UnresolvedName => "اسم غير معرف",
            Self::ImmutableAssignment => "تعيين لثابت",
            Self::MissingArgument => "وسيط مفقود",
            Self::TypeCoercion => "خطأ في الأنواع",
            Self::Arithmetic => "خطأ رياضي",
            Self::Invocation => "خطأ في الاستدعاء",
            Self::Redeclaration => "إعادة إعلان",
            Self::IndexOutOfBounds => "مؤشر خارج الحدود",
            Self::Unsupported => "عملية غير مدعومة",
            Self::InvalidValue => "قيمة غير صالحة",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Structured error carried by every failing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BugError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
    /// Secondary notes, such as the name of the function the error escaped.
    pub notes: Vec<String>,
}

impl BugError {
    #[cold]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        BugError {
            kind,
            message: message.into(),
            position: None,
            notes: Vec::new(),
        }
    }

    /// Attach a position unless a more precise one is already set.
    ///
    /// Errors are located at the innermost node that raised them, so outer
    /// frames calling `at` on the way up leave the original position intact.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    /// Replace the position unconditionally.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for BugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(pos) = self.position {
            write!(f, " (سطر {}، عمود {})", pos.line, pos.column)?;
        }
        for note in &self.notes {
            write!(f, "\n  ملاحظة: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BugError {}

#[cfg(test)]
mod tests;
