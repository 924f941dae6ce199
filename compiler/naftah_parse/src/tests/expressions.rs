use naftah_ir::{BinaryOp, ExprKind, NumberLit, UnaryOp};
use pretty_assertions::assert_eq;

use super::{ident_name, parse_ok, single_expr};
use crate::parse_source;

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_ok("1 + 2 * 3");
    let ExprKind::Binary { op: BinaryOp::Add, left, right } = &single_expr(&program).kind else {
        panic!("expected addition at the root");
    };
    assert!(matches!(program.arena.get_expr(*left).kind, ExprKind::Number(_)));
    assert!(matches!(
        program.arena.get_expr(*right).kind,
        ExprKind::Binary { op: BinaryOp::Mul, .. }
    ));
}

#[test]
fn arabic_operator_words_parse_like_symbols() {
    let words = parse_ok("2 زائد ٢");
    let ExprKind::Binary { op, left, right } = &single_expr(&words).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert_eq!(
        words.arena.get_expr(*left).kind,
        ExprKind::Number(NumberLit::decimal("2"))
    );
    assert_eq!(
        words.arena.get_expr(*right).kind,
        ExprKind::Number(NumberLit::decimal("2"))
    );
}

#[test]
fn power_is_right_associative_and_beats_negation() {
    let program = parse_ok("-2 ** 3 ** 2");
    let ExprKind::Unary { op: UnaryOp::Neg, operand } = &single_expr(&program).kind else {
        panic!("expected negation at the root");
    };
    let ExprKind::Binary { op: BinaryOp::Pow, right, .. } = &program.arena.get_expr(*operand).kind
    else {
        panic!("expected power under negation");
    };
    assert!(matches!(
        program.arena.get_expr(*right).kind,
        ExprKind::Binary { op: BinaryOp::Pow, .. }
    ));
}

#[test]
fn element_wise_operators_keep_their_own_kind() {
    let program = parse_ok("أ <+> ب <*> ت");
    let ExprKind::Binary { op, right, .. } = &single_expr(&program).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, BinaryOp::ElementAdd);
    assert!(matches!(
        program.arena.get_expr(*right).kind,
        ExprKind::Binary { op: BinaryOp::ElementMul, .. }
    ));
}

#[test]
fn spaced_question_mark_is_a_ternary() {
    let program = parse_ok("أ ؟ 1 : 2");
    assert!(matches!(single_expr(&program).kind, ExprKind::Ternary { .. }));
}

#[test]
fn coalesce_binds_looser_than_or() {
    let program = parse_ok("أ ؟؟ ب أو ت");
    let ExprKind::Binary { op, right, .. } = &single_expr(&program).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Coalesce);
    assert!(matches!(
        program.arena.get_expr(*right).kind,
        ExprKind::Binary { op: BinaryOp::Or, .. }
    ));
}

#[test]
fn glued_colon_is_field_access() {
    let program = parse_ok("المدينة:البلدة:الاسم");
    let ExprKind::Field { receiver, name, optional } = &single_expr(&program).kind else {
        panic!("expected field access");
    };
    assert_eq!(name, "الاسم");
    assert!(!optional);
    assert!(matches!(
        program.arena.get_expr(*receiver).kind,
        ExprKind::Field { .. }
    ));
}

#[test]
fn null_safe_marker_flags_the_following_segment() {
    let program = parse_ok(r#"المدينة؟["ء"]؟["عدد_البيوت"]"#);
    let ExprKind::Index { receiver, optional, .. } = &single_expr(&program).kind else {
        panic!("expected index");
    };
    assert!(optional);
    let ExprKind::Index { receiver: base, optional: inner, .. } =
        &program.arena.get_expr(*receiver).kind
    else {
        panic!("expected inner index");
    };
    assert!(inner);
    assert_eq!(ident_name(program.arena.get_expr(*base)), "المدينة");
}

#[test]
fn null_safe_field_segment() {
    let program = parse_ok("المدي؟:البلدة");
    assert!(matches!(
        single_expr(&program).kind,
        ExprKind::Field { optional: true, .. }
    ));
}

#[test]
fn call_with_positional_and_named_arguments() {
    let program = parse_ok("دالة_ما(1، ب تعيين 2)");
    let ExprKind::Call { callee, args } = &single_expr(&program).kind else {
        panic!("expected call");
    };
    assert_eq!(ident_name(program.arena.get_expr(*callee)), "دالة_ما");
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].name, None);
    assert_eq!(args[1].name.as_deref(), Some("ب"));
}

#[test]
fn positional_after_named_is_rejected() {
    let err = parse_source("ف(أ تعيين 1، 2)").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
}

#[test]
fn doubled_separator_is_a_foreign_call() {
    let program = parse_ok("جافا::لغة::نظام(1)");
    let ExprKind::ForeignCall { path, args } = &single_expr(&program).kind else {
        panic!("expected foreign call");
    };
    assert_eq!(path, &vec!["جافا".to_string(), "لغة".to_string(), "نظام".to_string()]);
    assert_eq!(args.len(), 1);
}

#[test]
fn collection_literals() {
    let list = parse_ok("[١، ٢، ٣]");
    assert!(matches!(&single_expr(&list).kind, ExprKind::List(items) if items.len() == 3));

    let tuple = parse_ok("(٣٢، ٤٥)");
    assert!(matches!(&single_expr(&tuple).kind, ExprKind::Tuple(items) if items.len() == 2));

    let grouped = parse_ok("(٣٢)");
    assert!(matches!(single_expr(&grouped).kind, ExprKind::Number(_)));

    let one_tuple = parse_ok("(٣٢،)");
    assert!(matches!(&single_expr(&one_tuple).kind, ExprKind::Tuple(items) if items.len() == 1));

    let set = parse_ok("{١، ٢، ٣}");
    assert!(matches!(&single_expr(&set).kind, ExprKind::Set(items) if items.len() == 3));

    let map = parse_ok(r#"{"اسم": "أحمد", "عمر": ٢٠}"#);
    assert!(matches!(&single_expr(&map).kind, ExprKind::Map(entries) if entries.len() == 2));

    let empty = parse_ok("{}");
    assert!(matches!(&single_expr(&empty).kind, ExprKind::Map(entries) if entries.is_empty()));
}

#[test]
fn object_literal_holds_declarations() {
    let program = parse_ok(
        "{
            متغير الاسم تعيين \"قبلي\",
            متغير البلدة تعيين {
                متغير عدد_البيوت تعيين 400
            }
        }",
    );
    assert!(matches!(&single_expr(&program).kind, ExprKind::Object(fields) if fields.len() == 2));
}

#[test]
fn raw_marker_disables_interpolation() {
    let program = parse_ok(r#"خام "${أ}""#);
    assert_eq!(
        single_expr(&program).kind,
        ExprKind::Str {
            text: "${أ}".to_string(),
            raw: true
        }
    );
}

#[test]
fn glued_increment_is_postfix() {
    let program = parse_ok("أ++");
    assert!(matches!(
        single_expr(&program).kind,
        ExprKind::Unary { op: UnaryOp::PostIncrement, .. }
    ));
}

#[test]
fn increment_word_before_operand_is_prefix() {
    let program = parse_ok("زد أ");
    assert!(matches!(
        single_expr(&program).kind,
        ExprKind::Unary { op: UnaryOp::PreIncrement, .. }
    ));
}

#[test]
fn missing_operand_reports_position() {
    let err = parse_source("1 +\n").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
    assert!(err.position.is_some());
}

#[test]
fn deeply_nested_parentheses_do_not_overflow() {
    let depth = 2_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let program = parse_ok(&source);
    assert!(matches!(single_expr(&program).kind, ExprKind::Number(_)));
}
