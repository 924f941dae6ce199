use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_includes_kind_message_and_position() {
    let err = BugError::new(ErrorKind::Arithmetic, "القسمة على صفر.").with_position(Position::new(3, 7));
    assert_eq!(
        err.to_string(),
        "خطأ رياضي: القسمة على صفر. (سطر 3، عمود 7)"
    );
}

#[test]
fn display_without_position_omits_location() {
    let err = BugError::new(ErrorKind::Syntax, "رمز غير متوقع.");
    assert_eq!(err.to_string(), "خطأ نحوي: رمز غير متوقع.");
}

#[test]
fn at_keeps_the_innermost_position() {
    let err = BugError::new(ErrorKind::UnresolvedName, "x")
        .at(Position::new(5, 2))
        .at(Position::new(1, 1));
    assert_eq!(err.position, Some(Position::new(5, 2)));
}

#[test]
fn with_position_overrides() {
    let err = BugError::new(ErrorKind::UnresolvedName, "x")
        .at(Position::new(5, 2))
        .with_position(Position::new(1, 1));
    assert_eq!(err.position, Some(Position::new(1, 1)));
}

#[test]
fn notes_render_on_their_own_lines() {
    let err = BugError::new(ErrorKind::Invocation, "فشل").with_note("في الدالة 'س'");
    assert_eq!(err.to_string(), "خطأ في الاستدعاء: فشل\n  ملاحظة: في الدالة 'س'");
}
