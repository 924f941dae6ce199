//! Error factories.
//!
//! One constructor per failure mode, so messages stay uniform across the
//! lexer, parser and evaluator. All are `#[cold]`: they only run on the
//! failure path.

use crate::{BugError, ErrorKind};

// Lexical

#[cold]
pub fn unrecognized_character(text: &str) -> BugError {
    BugError::new(
        ErrorKind::Lexical,
        format!("رمز غير معروف: '{text}'."),
    )
}

#[cold]
pub fn unterminated_string() -> BugError {
    BugError::new(ErrorKind::Lexical, "نص غير مغلق.")
}

#[cold]
pub fn invalid_escape(escape: char) -> BugError {
    BugError::new(
        ErrorKind::Lexical,
        format!("تسلسل هروب غير صالح: '\\{escape}'."),
    )
}

#[cold]
pub fn invalid_radix(radix: &str) -> BugError {
    BugError::new(
        ErrorKind::Lexical,
        format!("الأساس '{radix}' غير صالح. يجب أن يكون الأساس بين 2 و 36."),
    )
}

#[cold]
pub fn invalid_digit_for_radix(digit: char, radix: u32) -> BugError {
    BugError::new(
        ErrorKind::Lexical,
        format!("الرقم '{digit}' غير صالح في الأساس {radix}."),
    )
}

// Syntax

#[cold]
pub fn unexpected_token(found: &str, expected: &str) -> BugError {
    BugError::new(
        ErrorKind::Syntax,
        format!("وُجد {found} بينما كان المتوقع {expected}."),
    )
}

#[cold]
pub fn expected_expression(found: &str) -> BugError {
    BugError::new(
        ErrorKind::Syntax,
        format!("كان المتوقع تعبيرا، لكن وُجد {found}."),
    )
}

#[cold]
pub fn invalid_assignment_target() -> BugError {
    BugError::new(
        ErrorKind::Syntax,
        "الطرف الأيسر للتعيين يجب أن يكون متغيرا أو حقلا أو عنصرا مفهرسا.",
    )
}

#[cold]
pub fn unknown_type(name: &str) -> BugError {
    BugError::new(ErrorKind::Syntax, format!("النوع '{name}' غير معروف."))
}

#[cold]
pub fn positional_after_named() -> BugError {
    BugError::new(
        ErrorKind::Syntax,
        "لا يمكن تمرير وسيط موضعي بعد وسيط مسمى.",
    )
}

// Names and scopes

#[cold]
pub fn unresolved_name(name: &str) -> BugError {
    BugError::new(
        ErrorKind::UnresolvedName,
        format!("المتغير '{name}' غير موجود في السياق الحالي."),
    )
}

#[cold]
pub fn unresolved_function(name: &str) -> BugError {
    BugError::new(
        ErrorKind::UnresolvedName,
        format!("الدالة '{name}' غير موجودة في السياق الحالي."),
    )
}

#[cold]
pub fn unknown_parameter(function: &str, name: &str) -> BugError {
    BugError::new(
        ErrorKind::UnresolvedName,
        format!("المعامل '{name}' غير موجود في الدالة '{function}'."),
    )
}

#[cold]
pub fn immutable_assignment(name: &str) -> BugError {
    BugError::new(
        ErrorKind::ImmutableAssignment,
        format!("لا يمكن إعادة تعيين الثابت '{name}'."),
    )
}

#[cold]
pub fn variable_redeclared(name: &str) -> BugError {
    BugError::new(
        ErrorKind::Redeclaration,
        format!("المتغير '{name}' موجود في السياق الحالي. لا يمكن إعادة إعلانه."),
    )
}

#[cold]
pub fn function_redeclared(name: &str) -> BugError {
    BugError::new(
        ErrorKind::Redeclaration,
        format!("الدالة '{name}' موجودة في السياق الحالي. لا يمكن إعادة إعلانها."),
    )
}

#[cold]
pub fn parameter_redeclared(function: &str, name: &str) -> BugError {
    BugError::new(
        ErrorKind::Redeclaration,
        format!("المعامل '{name}' موجود في السياق الحالي للدالة '{function}'. لا يمكن إعادة إعلانه."),
    )
}

#[cold]
pub fn argument_redeclared(function: &str, name: &str) -> BugError {
    BugError::new(
        ErrorKind::Redeclaration,
        format!("الوسيط '{name}' موجود في السياق الحالي للدالة '{function}'. لا يمكن إعادة إعلانه."),
    )
}

// Calls

#[cold]
pub fn missing_argument(function: &str, param: &str) -> BugError {
    BugError::new(
        ErrorKind::MissingArgument,
        format!("المعامل '{param}' للدالة '{function}' يحتاج إلى قيمة."),
    )
}

#[cold]
pub fn too_many_arguments(function: &str, expected: usize, got: usize) -> BugError {
    BugError::new(
        ErrorKind::InvalidValue,
        format!("الدالة '{function}' تقبل {expected} وسيطا، لكن مُرر {got}."),
    )
}

#[cold]
pub fn not_callable(type_name: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("قيمة من النوع '{type_name}' غير قابلة للاستدعاء."),
    )
}

#[cold]
pub fn invocation_failed(alias: &str, reason: &str) -> BugError {
    BugError::new(
        ErrorKind::Invocation,
        format!("فشل استدعاء '{alias}': {reason}"),
    )
}

#[cold]
pub fn foreign_member_not_found(alias: &str) -> BugError {
    BugError::new(
        ErrorKind::UnresolvedName,
        format!("العضو الخارجي '{alias}' غير موجود."),
    )
}

// Operators and types

#[cold]
pub fn unsupported_operands(op: &str, left: &str, right: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("العملية '{op}' غير مدعومة للنوعين: '{left}' و'{right}'."),
    )
}

#[cold]
pub fn unsupported_operand(op: &str, type_name: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("العملية '{op}' غير مدعومة للنوع: '{type_name}'."),
    )
}

/// Increment or decrement of `NaN` or `None`.
#[cold]
pub fn not_steppable(op: &str, type_name: &str) -> BugError {
    BugError::new(
        ErrorKind::Unsupported,
        format!("العملية '{op}' غير مدعومة للنوع: '{type_name}'."),
    )
}

#[cold]
pub fn length_mismatch(op: &str, left: usize, right: usize) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("العملية '{op}' تتطلب طولين متساويين، لكن الطولين هما {left} و {right}."),
    )
}

#[cold]
pub fn type_mismatch(name: &str, expected: &str, got: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("لا يمكن تعيين قيمة من النوع '{got}' إلى '{name}' من النوع '{expected}'."),
    )
}

#[cold]
pub fn division_by_zero() -> BugError {
    BugError::new(ErrorKind::Arithmetic, "القسمة على صفر.")
}

#[cold]
pub fn modulo_by_zero() -> BugError {
    BugError::new(ErrorKind::Arithmetic, "باقي القسمة على صفر.")
}

// Collections

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> BugError {
    BugError::new(
        ErrorKind::IndexOutOfBounds,
        format!("المؤشر المطلوب ({index}) خارج الحدود. عدد العناصر الحالية هو {len}."),
    )
}

#[cold]
pub fn not_indexable(type_name: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("لا يمكن استخدام الفهرسة مع النوع '{type_name}'."),
    )
}

#[cold]
pub fn not_iterable(type_name: &str) -> BugError {
    BugError::new(
        ErrorKind::TypeCoercion,
        format!("لا يمكن التكرار على قيمة من النوع '{type_name}'."),
    )
}

#[cold]
pub fn key_not_found(key: &str) -> BugError {
    BugError::new(
        ErrorKind::UnresolvedName,
        format!("المفتاح '{key}' غير موجود."),
    )
}

// Control flow

#[cold]
pub fn loop_bounds_not_numeric(var: &str) -> BugError {
    BugError::new(
        ErrorKind::Unsupported,
        format!("يجب أن تكون القيمتين الابتدائية والنهائية و الخطوة للمتغير '{var}' من النوع الرقمي."),
    )
}

#[cold]
pub fn invalid_loop_step(var: &str) -> BugError {
    BugError::new(
        ErrorKind::Unsupported,
        format!("قيمة الخطوة للمتغير '{var}' لا يمكن أن تكون أقل من أو يساوي 0."),
    )
}

#[cold]
pub fn ascending_bounds_reversed() -> BugError {
    BugError::new(
        ErrorKind::Unsupported,
        "القيمة النهائية يجب أن تكون أكبر أو تساوي القيمة الابتدائية في الحلقات التصاعدية.",
    )
}

#[cold]
pub fn descending_bounds_reversed() -> BugError {
    BugError::new(
        ErrorKind::Unsupported,
        "القيمة الابتدائية يجب أن تكون أكبر أو تساوي القيمة النهائية في الحلقات التنازلية.",
    )
}

/// `اكسر`/`تابع` with no enclosing loop (or no loop carrying the label).
#[cold]
pub fn signal_outside_loop(keyword: &str, label: Option<&str>) -> BugError {
    let message = match label {
        Some(label) => format!("'{keyword} {label}' خارج أي حلقة تحمل التسمية '{label}'."),
        None => format!("'{keyword}' خارج أي حلقة."),
    };
    BugError::new(ErrorKind::Unsupported, message)
}

#[cold]
pub fn invalid_value(message: impl Into<String>) -> BugError {
    BugError::new(ErrorKind::InvalidValue, message)
}
