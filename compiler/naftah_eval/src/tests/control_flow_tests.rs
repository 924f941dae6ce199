//! Conditionals, loops, jumps, case and try.

use naftah_diagnostic::ErrorKind;

use super::{run, run_err, run_printing};
use crate::value::Value;

mod conditionals {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_truthy_branch_wins() {
        let source = "متغير أ تعيين 5
        متغير نتيجة تعيين 0
        إذا أ أكبر_من 10 إذن {
            نتيجة تعيين 1
        } غير_ذلك_إذا أ أكبر_من 3 إذن {
            نتيجة تعيين 2
        } غير_ذلك {
            نتيجة تعيين 3
        }
        أنهي
        نتيجة";
        assert_eq!(run(source), Value::int(2));
    }

    #[test]
    fn branches_open_their_own_scope() {
        let source = "إذا صحيح إذن { متغير داخلي تعيين 1 } أنهي\nداخلي";
        run_err(source, ErrorKind::UnresolvedName);
    }

    #[test]
    fn ternary_picks_by_truthiness() {
        assert_eq!(run("0 ؟ \"نعم\" : \"لا\""), Value::string("لا"));
        assert_eq!(run("[1] ؟ \"نعم\" : \"لا\""), Value::string("نعم"));
    }
}

mod counted_loops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascending_bounds_are_inclusive() {
        let source = "متغير مجموع تعيين 0
        كرر_حلقة ع تعيين 1 إلى 10 إفعل {
            مجموع تعيين مجموع زائد ع
        }
        أنهي
        مجموع";
        assert_eq!(run(source), Value::int(55));
    }

    #[test]
    fn descending_with_step() {
        let source = "كرر_حلقة ع تعيين 10 تنازليا 1 خطوة 3 إفعل {
            إطبع(ع)
        }
        أنهي";
        assert_eq!(run_printing(source), "10\n7\n4\n1\n");
    }

    #[test]
    fn fractional_steps() {
        let source = "كرر_حلقة ع تعيين 0 إلى 1 خطوة 0.5 إفعل { إطبع(ع) } أنهي";
        assert_eq!(run_printing(source), "0\n0٫5\n1\n");
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        run_err(
            "كرر_حلقة ع تعيين 5 إلى 1 إفعل { ع } أنهي",
            ErrorKind::Unsupported,
        );
        run_err(
            "كرر_حلقة ع تعيين 1 تنازليا 5 إفعل { ع } أنهي",
            ErrorKind::Unsupported,
        );
    }

    #[test]
    fn step_must_be_positive() {
        run_err(
            "كرر_حلقة ع تعيين 1 إلى 5 خطوة 0 إفعل { ع } أنهي",
            ErrorKind::Unsupported,
        );
    }

    #[test]
    fn bounds_must_be_numbers() {
        run_err(
            "كرر_حلقة ع تعيين \"أ\" إلى 5 إفعل { ع } أنهي",
            ErrorKind::Unsupported,
        );
    }

    #[test]
    fn loop_variable_does_not_leak() {
        run_err(
            "كرر_حلقة ع تعيين 1 إلى 2 إفعل { ع } أنهي\nع",
            ErrorKind::UnresolvedName,
        );
    }
}

mod for_each {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn walks_lists_strings_and_maps() {
        assert_eq!(
            run_printing("كرر_حلقة س في [1، 2، 3] إفعل { إطبع(س) } أنهي"),
            "1\n2\n3\n"
        );
        assert_eq!(
            run_printing("كرر_حلقة ح في \"أب\" إفعل { إطبع(ح) } أنهي"),
            "أ\nب\n"
        );
    }

    #[test]
    fn else_runs_when_the_loop_runs_out() {
        let source = "كرر_حلقة س في [1، 2] إفعل { إطبع(س) } غير_ذلك { إطبع(\"انتهى\") } أنهي";
        assert_eq!(run_printing(source), "1\n2\nانتهى\n");
    }

    #[test]
    fn else_is_skipped_after_break() {
        let source = "كرر_حلقة س في [1، 2، 3] إفعل {
            إذا س يساوي 2 إذن { اكسر } أنهي
            إطبع(س)
        } غير_ذلك {
            إطبع(\"انتهى\")
        }
        أنهي";
        assert_eq!(run_printing(source), "1\n");
    }

    #[test]
    fn numbers_are_not_iterable() {
        run_err("كرر_حلقة س في 5 إفعل { س } أنهي", ErrorKind::TypeCoercion);
    }
}

mod while_and_repeat {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn while_checks_before_each_iteration() {
        let source = "متغير أ تعيين 0
        بينما أ أصغر_من 3 افعل {
            زد أ
        }
        أنهي
        أ";
        assert_eq!(run(source), Value::int(3));
        assert_eq!(run("بينما خطأ افعل { 1 } أنهي"), Value::None);
    }

    #[test]
    fn repeat_runs_at_least_once() {
        let source = "متغير أ تعيين 100
        كرر {
            زد أ
        }
        حتى أ أكبر_من 9
        أنهي
        أ";
        assert_eq!(run(source), Value::int(101));
    }

    #[test]
    fn continue_skips_the_rest_of_the_body() {
        let source = "متغير أ تعيين 0
        بينما أ أصغر_من 5 افعل {
            زد أ
            إذا أ باقي 2 يساوي 0 إذن { تابع } أنهي
            إطبع(أ)
        }
        أنهي";
        assert_eq!(run_printing(source), "1\n3\n5\n");
    }
}

mod labels {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_continue_resumes_the_outer_loop() {
        let source = "متغير مجموع تعيين 0
        الخارجي:
        كرر_حلقة أ تعيين 1 إلى 3 إفعل {
            كرر_حلقة ب تعيين 1 إلى 3 إفعل {
                إذا ب يساوي 2 إذن { تابع الخارجي } أنهي
                مجموع تعيين مجموع زائد 1
            }
            أنهي
        }
        أنهي
        مجموع";
        assert_eq!(run(source), Value::int(3));
    }

    #[test]
    fn labeled_break_leaves_both_loops() {
        let source = "الخارجي:
        كرر_حلقة أ تعيين 1 إلى 3 إفعل {
            الداخلي:
            كرر_حلقة ب تعيين 1 إلى 3 إفعل {
                إطبع(أ ضارب 10 زائد ب)
                إذا ب يساوي 2 إذن { اكسر الخارجي } أنهي
            }
            أنهي
        } غير_ذلك {
            إطبع(\"لم ينفذ\")
        }
        أنهي";
        assert_eq!(run_printing(source), "11\n12\n");
    }

    #[test]
    fn labeled_break_stops_at_its_own_level() {
        let source = "متغير خارجي، وسط، داخلي تعيين 0، 0، 0
        خ1:
        كرر_حلقة أ تعيين 1 إلى 5 إفعل {
            خارجي تعيين خارجي زائد 1
            خ2:
            كرر_حلقة ب تعيين 1 إلى 5 إفعل {
                وسط تعيين وسط زائد 1
                خ3:
                كرر_حلقة ج تعيين 1 إلى 5 إفعل {
                    داخلي تعيين داخلي زائد 1
                    إذا أ يساوي 3 و ب يساوي 3 و ج يساوي 3 إذن { اكسر خ2 } أنهي
                }
                أنهي
            }
            أنهي
        }
        أنهي
        (خارجي، وسط، داخلي)";
        assert_eq!(
            run(source),
            Value::tuple(vec![Value::int(5), Value::int(23), Value::int(113)])
        );
    }

    #[test]
    fn break_leaves_a_labeled_block() {
        let source = "كتلة: {
            إطبع(1)
            اكسر كتلة
            إطبع(2)
        }
        إطبع(3)";
        assert_eq!(run_printing(source), "1\n3\n");
    }

    #[test]
    fn jumps_outside_loops_are_errors() {
        run_err("اكسر", ErrorKind::Unsupported);
        run_err("تابع", ErrorKind::Unsupported);
        let err = run_err(
            "كرر_حلقة أ تعيين 1 إلى 2 إفعل { اكسر مجهول } أنهي",
            ErrorKind::Unsupported,
        );
        assert!(err.message.contains("مجهول"));
    }
}

mod case {
    use super::*;
    use pretty_assertions::assert_eq;

    const GRADES: &str = "دالة تقدير(ت) {
        اختر ت من_بين
        1؛2؛3: {
            ارجع \"قليل\"
        } 4؛5: {
            ارجع \"وسط\"
        } غير_ذلك {
            ارجع \"كثير\"
        }
    }
    ";

    #[test]
    fn labels_match_by_value() {
        assert_eq!(run(&format!("{GRADES}تقدير(2)")), Value::string("قليل"));
        assert_eq!(run(&format!("{GRADES}تقدير(5)")), Value::string("وسط"));
        assert_eq!(run(&format!("{GRADES}تقدير(9)")), Value::string("كثير"));
    }

    #[test]
    fn no_match_and_no_else_is_none() {
        assert_eq!(run("اختر 7 من_بين 1: { 10 }"), Value::None);
    }
}

mod try_statement {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failures_route_to_the_failure_arm() {
        let source = "حاول(1 قسمة 0){
            نجاح(أ) -> \"نجاح\"
            فشل(ب) -> \"فشل\"
        }";
        assert_eq!(run(source), Value::string("فشل"));
    }

    #[test]
    fn success_binds_the_value() {
        let source = "حاول(10 قسمة 2){
            نجاح(أ) -> أ زائد 1
            فشل(ب) -> 0
        }";
        assert_eq!(run(source), Value::int(6));
    }

    #[test]
    fn the_failure_is_bound_as_an_error_value() {
        let source = "حاول(س_مجهول){
            نجاح(أ) -> أ
            فشل(ب) إفعل نوع(ب)
        }";
        assert_eq!(run(source), Value::string("خطأ"));
    }

    #[test]
    fn option_arms_split_on_none() {
        let source = "حاول(لاشيء){
            بعض(أ) -> أ
            معدوم إفعل \"لاشيء هنا\"
        }";
        assert_eq!(run(source), Value::string("لاشيء هنا"));
        let source = "حاول(3){
            بعض(أ) -> أ ضارب 2
            معدوم إفعل 0
        }";
        assert_eq!(run(source), Value::int(6));
    }
}

mod top_level_return {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_ends_the_program() {
        assert_eq!(run("ارجع 5\nإطبع(1)"), Value::int(5));
        assert_eq!(run_printing("إطبع(1)\nارجع\nإطبع(2)"), "1\n");
    }

    #[test]
    fn several_values_form_a_tuple() {
        assert_eq!(
            run("ارجع 1، 2"),
            Value::tuple(vec![Value::int(1), Value::int(2)])
        );
    }
}
