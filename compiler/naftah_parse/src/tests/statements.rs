use naftah_ir::{ExprKind, StmtKind, TryKind, TypeName};
use pretty_assertions::assert_eq;

use super::{parse_ok, single_expr, single_stmt};
use crate::parse_source;

#[test]
fn declaration_with_type_and_value() {
    let program = parse_ok("ثابت س: عدد_طويل تعيين 5");
    let StmtKind::Declare { mutable, names, ty, values } = &single_stmt(&program).kind else {
        panic!("expected declaration");
    };
    assert!(!mutable);
    assert_eq!(names, &vec!["س".to_string()]);
    assert_eq!(*ty, Some(TypeName::Long));
    assert_eq!(values.len(), 1);
}

#[test]
fn multi_name_declaration_pairs_values() {
    let program = parse_ok("متغير أ، ب، ت تعيين 1، 2، 3");
    let StmtKind::Declare { names, values, .. } = &single_stmt(&program).kind else {
        panic!("expected declaration");
    };
    assert_eq!(names.len(), 3);
    assert_eq!(values.len(), 3);
}

#[test]
fn unknown_type_is_a_syntax_error() {
    let err = parse_source("متغير س: شيء_ما").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
}

#[test]
fn statements_need_no_terminator() {
    let program = parse_ok("متغير أ تعيين ١\nمتغير ب تعيين 4\nأ زائد ب");
    assert_eq!(program.body.len(), 3);
}

#[test]
fn assignment_to_a_literal_is_rejected() {
    let err = parse_source("1 تعيين 2").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
}

#[test]
fn function_with_defaults_and_return_type() {
    let program = parse_ok(
        "دالة جمع(أ، ب، ثابت ت تعيين 3) : عدد_صحيح {
            ارجع أ زائد ب زائد ت
        }",
    );
    let StmtKind::Function(decl) = &single_stmt(&program).kind else {
        panic!("expected function");
    };
    assert_eq!(decl.name, "جمع");
    assert_eq!(decl.params.len(), 3);
    assert!(decl.params[0].is_required());
    assert!(!decl.params[2].is_required());
    assert!(!decl.params[2].mutable);
    assert_eq!(decl.return_type, Some(TypeName::Int));
}

#[test]
fn if_elseif_else_chain() {
    let program = parse_ok(
        "إذا أ أكبر_من ب إذن {
            أرجع أ
        } غير_ذلك_إذا أ أصغر_من ب إذن {
            أرجع ب
        } غير_ذلك {
            أرجع
        }
        أنهي",
    );
    let StmtKind::If { branches, else_branch } = &single_stmt(&program).kind else {
        panic!("expected if");
    };
    assert_eq!(branches.len(), 2);
    let else_block = program.arena.get_stmt(else_branch.unwrap());
    let StmtKind::Block(body) = &else_block.kind else {
        panic!("expected block");
    };
    assert!(matches!(
        &program.arena.get_stmt(body[0]).kind,
        StmtKind::Return(values) if values.is_empty()
    ));
}

#[test]
fn labeled_for_loops_with_labeled_break() {
    let program = parse_ok(
        "الخارجي:
        كرر_حلقة أ تعيين 1 إلى 5 إفعل {
            الداخلي:
            كرر_حلقة ب تعيين 5 تنازليا 1 خطوة 2 إفعل {
                اكسر الخارجي
            }
            أنهي
        }
        أنهي",
    );
    let outer = single_stmt(&program);
    assert_eq!(outer.label.as_deref(), Some("الخارجي"));
    let StmtKind::ForRange { body, descending, .. } = &outer.kind else {
        panic!("expected range loop");
    };
    assert!(!descending);

    let StmtKind::Block(stmts) = &program.arena.get_stmt(*body).kind else {
        panic!("expected block");
    };
    let inner = program.arena.get_stmt(stmts[0]);
    assert_eq!(inner.label.as_deref(), Some("الداخلي"));
    let StmtKind::ForRange { body, descending, step, .. } = &inner.kind else {
        panic!("expected inner range loop");
    };
    assert!(descending);
    assert!(step.is_some());

    let StmtKind::Block(stmts) = &program.arena.get_stmt(*body).kind else {
        panic!("expected block");
    };
    assert_eq!(
        program.arena.get_stmt(stmts[0]).kind,
        StmtKind::Break(Some("الخارجي".to_string()))
    );
}

#[test]
fn jump_label_must_share_the_line() {
    let program = parse_ok("كرر_حلقة أ تعيين 1 إلى 2 إفعل {\n اكسر\n س\n}");
    let StmtKind::ForRange { body, .. } = &single_stmt(&program).kind else {
        panic!("expected loop");
    };
    let StmtKind::Block(stmts) = &program.arena.get_stmt(*body).kind else {
        panic!("expected block");
    };
    assert_eq!(stmts.len(), 2);
    assert_eq!(program.arena.get_stmt(stmts[0]).kind, StmtKind::Break(None));
}

#[test]
fn for_each_with_else_block() {
    let program = parse_ok("كرر_حلقة س في [1، 2] إفعل { س } غير_ذلك { 0 }");
    assert!(matches!(
        single_stmt(&program).kind,
        StmtKind::ForEach { else_branch: Some(_), .. }
    ));
}

#[test]
fn while_and_repeat() {
    let program = parse_ok(
        "بينما أ أصغر_من ١٠ افعل {
            إطبع(أ) أنهي
            زد أ
        }
        أنهي
        كرر {
            زد أ
        }
        حتى أ أكبر_من 9
        أنهي",
    );
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.arena.get_stmt(program.body[0]).kind, StmtKind::While { .. }));
    assert!(matches!(program.arena.get_stmt(program.body[1]).kind, StmtKind::Repeat { .. }));
}

#[test]
fn case_with_split_among_and_else() {
    let program = parse_ok(
        "اختر ت من بين
        15؛2؛3؛ت أكبر_من ١٠: {
            ارجع 1
        } \"15\"؛خاطئ؛5: {
            ارجع 2
        } غير_ذلك {
            ارجع 3
        }
        إطبع(ت)",
    );
    assert_eq!(program.body.len(), 2);
    let StmtKind::Case { arms, else_branch, .. } = &program.arena.get_stmt(program.body[0]).kind
    else {
        panic!("expected case");
    };
    assert_eq!(arms.len(), 2);
    assert_eq!(arms[0].labels.len(), 4);
    assert_eq!(arms[1].labels.len(), 3);
    assert!(else_branch.is_some());
}

#[test]
fn case_ends_before_following_statement() {
    let program = parse_ok("اختر س من_بين 1: { 10 }\nإطبع(س)");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn try_result_arms_accept_block_or_statement() {
    let program = parse_ok(
        "حاول(1 قسمة 0){
            نجاح(أ) -> {
                إطبع(أ)
                ارجع أ
            }
            فشل(ب) إفعل إلى_نص(ب)
        }",
    );
    let StmtKind::Try { kind: TryKind::Result { ok, err }, .. } = &single_stmt(&program).kind else {
        panic!("expected result try");
    };
    assert_eq!(ok.binding, "أ");
    assert_eq!(err.binding, "ب");
    assert!(matches!(program.arena.get_stmt(ok.body).kind, StmtKind::Block(_)));
    assert!(matches!(program.arena.get_stmt(err.body).kind, StmtKind::Expr(_)));
}

#[test]
fn try_arms_may_be_separated_by_semicolon() {
    let program = parse_ok("حاول(1){ نجاح(أ) -> أ ; فشل(ب) -> ب }");
    assert!(matches!(single_stmt(&program).kind, StmtKind::Try { .. }));
}

#[test]
fn try_option_arms() {
    let program = parse_ok(
        "حاول(لاشيء){
            بعض(أ) -> أ
            معدوم إفعل إلى_نص(\"لاشيء.\")
        }",
    );
    assert!(matches!(
        single_stmt(&program).kind,
        StmtKind::Try { kind: TryKind::Option { .. }, .. }
    ));
}

#[test]
fn try_requires_both_arms() {
    let err = parse_source("حاول(1){ نجاح(أ) -> أ }").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
}

#[test]
fn labeled_block() {
    let program = parse_ok("كتلة: { اكسر كتلة }");
    let stmt = single_stmt(&program);
    assert_eq!(stmt.label.as_deref(), Some("كتلة"));
    assert!(matches!(stmt.kind, StmtKind::Block(_)));
}

#[test]
fn return_with_several_values() {
    let program = parse_ok("ارجع 1، 2، 3");
    assert!(matches!(&single_stmt(&program).kind, StmtKind::Return(values) if values.len() == 3));
}

#[test]
fn unclosed_block_fails_fast() {
    let err = parse_source("إذا صحيح إذن {\n 1\n").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Syntax));
    assert!(err.position.is_some());
}

#[test]
fn lexical_errors_pass_through_parse_source() {
    let err = parse_source("1 @ 2").unwrap_err();
    assert!(err.is(naftah_diagnostic::ErrorKind::Lexical));
}

#[test]
fn braces_without_literal_shape_stay_blocks() {
    for source in [
        "{ س تعيين 5 }",
        "{ متغير س تعيين 2 }",
        "{ أ ؟ 1 : 2 }",
        "{ المدينة:الاسم }",
        "{ متغير د تعيين 1\n 1 قسمة 0 }",
        "{ خ: كرر_حلقة أ تعيين 1 إلى 3 إفعل { اكسر خ } أنهي }",
    ] {
        let program = parse_ok(source);
        assert!(
            matches!(single_stmt(&program).kind, StmtKind::Block(_)),
            "{source:?} should be a block"
        );
    }
}

#[test]
fn literals_can_start_a_statement() {
    let set = parse_ok("{1، 2، 3}\nطول(س)");
    let first = set.arena.get_stmt(set.body[0]);
    let StmtKind::Expr(id) = &first.kind else {
        panic!("expected expression statement, got {:?}", first.kind);
    };
    assert!(matches!(&set.arena.get_expr(*id).kind, ExprKind::Set(items) if items.len() == 3));

    let object = parse_ok("{ متغير أ تعيين 1، ثابت ب تعيين { متغير ج تعيين 2 } }");
    assert!(matches!(&single_expr(&object).kind, ExprKind::Object(fields) if fields.len() == 2));

    let map = parse_ok("{أ: 1، ب: أ ؟ 2 : 3}");
    assert!(matches!(&single_expr(&map).kind, ExprKind::Map(entries) if entries.len() == 2));
}
