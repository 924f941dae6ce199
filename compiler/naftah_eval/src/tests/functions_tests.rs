//! User functions, builtins and foreign calls.

use std::rc::Rc;

use naftah_diagnostic::{invocation_failed, BugError, ErrorKind};

use super::{run, run_err};
use crate::config::InterpreterConfig;
use crate::interop::{InteropBoundary, MemberHandle};
use crate::interpreter::Interpreter;
use crate::print_handler::silent_handler;
use crate::value::{Number, NumberStyle, Value, Width};

const SUM: &str = "دالة جمع(أ، ب تعيين 10) {
    ارجع أ زائد ب
}
";

fn with_sum(tail: &str) -> String {
    format!("{SUM}{tail}")
}

mod arguments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_fill_missing_arguments() {
        assert_eq!(run(&with_sum("جمع(1)")), Value::int(11));
        assert_eq!(run(&with_sum("جمع(1، 2)")), Value::int(3));
    }

    #[test]
    fn named_arguments_bind_by_name() {
        assert_eq!(run(&with_sum("جمع(ب تعيين 5، أ تعيين 1)")), Value::int(6));
        assert_eq!(run(&with_sum("جمع(1، ب تعيين 5)")), Value::int(6));
    }

    #[test]
    fn required_and_defaulted_parameters_bind_the_same_way() {
        let declaration = "دالة ف(أ، ب، ت تعيين 3، ث تعيين 4، ج تعيين 5) {
            ارجع أ، ب، ت، ث، ج
        }
        ";
        let expected = Value::tuple((1..=5).map(Value::int).collect());
        for call in [
            "ف(1، 2)",
            "ف(1، 2، 3، 4، 5)",
            "ف(ب تعيين 2، أ تعيين 1)",
            "ف(1، ب تعيين 2، ث تعيين 4)",
            "ف(ج تعيين 5، ت تعيين 3، ب تعيين 2، أ تعيين 1، ث تعيين 4)",
        ] {
            assert_eq!(run(&format!("{declaration}{call}")), expected, "{call}");
        }
        run_err(&format!("{declaration}ف()"), ErrorKind::MissingArgument);
        run_err(&format!("{declaration}ف(1)"), ErrorKind::MissingArgument);
    }

    #[test]
    fn defaults_see_earlier_parameters() {
        let source = "دالة ف(أ، ب تعيين أ ضارب 2) {
            ارجع أ زائد ب
        }
        ف(3)";
        assert_eq!(run(source), Value::int(9));
    }

    #[test]
    fn binding_errors() {
        run_err(&with_sum("جمع()"), ErrorKind::MissingArgument);
        run_err(&with_sum("جمع(1، 2، 3)"), ErrorKind::InvalidValue);
        run_err(&with_sum("جمع(1، أ تعيين 2)"), ErrorKind::Redeclaration);
        run_err(&with_sum("جمع(1، ج تعيين 2)"), ErrorKind::UnresolvedName);
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        run_err("دالة ف(أ، أ) { ارجع أ }", ErrorKind::Redeclaration);
    }

    #[test]
    fn constant_parameters_cannot_be_reassigned() {
        run_err(
            "دالة ف(ثابت أ) { أ تعيين 2 }\nف(1)",
            ErrorKind::ImmutableAssignment,
        );
    }
}

mod bodies {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recursion_widens_to_big_integers() {
        let source = "دالة مضروب(ن) {
            إذا ن أصغر_أو_يساوي 1 إذن { ارجع 1 } أنهي
            ارجع ن ضارب مضروب(ن ناقص 1)
        }
        مضروب(30)";
        let value = run(source);
        assert_eq!(
            value.render(NumberStyle::Latin),
            "265252859812191058636308480000000"
        );
        let Value::Number(n) = value else {
            panic!("number expected");
        };
        assert_eq!(n.width(), Width::Big);
    }

    #[test]
    fn a_body_without_return_gives_none() {
        assert_eq!(run("دالة ف() { 5 }\nف()"), Value::None);
    }

    #[test]
    fn return_leaves_loops_inside_the_function() {
        let source = "دالة أول_زوجي(ق) {
            كرر_حلقة س في ق إفعل {
                إذا س باقي 2 يساوي 0 إذن { ارجع س } أنهي
            }
            أنهي
            ارجع لاشيء
        }
        أول_زوجي([3، 5، 8، 10])";
        assert_eq!(run(source), Value::int(8));
    }

    #[test]
    fn return_types_convert_and_check() {
        let value = run("دالة ف() : عدد_طويل { ارجع 1 }\nف()");
        assert!(matches!(value, Value::Number(Number::Long(1))));
        run_err("دالة ف() : منطقي { ارجع 1 }\nف()", ErrorKind::TypeCoercion);
    }

    #[test]
    fn loop_jumps_do_not_escape_a_function() {
        let source = "كرر_حلقة أ تعيين 1 إلى 3 إفعل {
            دالة ف() { اكسر }
            ف()
        }
        أنهي";
        run_err(source, ErrorKind::Unsupported);
    }
}

mod scoping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn functions_see_globals() {
        assert_eq!(
            run("متغير عام تعيين 7\nدالة ف() { ارجع عام }\nف()"),
            Value::int(7)
        );
    }

    #[test]
    fn functions_do_not_see_their_callers_locals() {
        let source = "دالة ف() { ارجع محلي }
        دالة غ() {
            متغير محلي تعيين 1
            ارجع ف()
        }
        غ()";
        run_err(source, ErrorKind::UnresolvedName);
    }

    #[test]
    fn functions_are_values() {
        let source = "دالة ضعف(ن) { ارجع ن ضارب 2 }
        متغير ف تعيين ضعف
        ف(4)";
        assert_eq!(run(source), Value::int(8));
    }

    #[test]
    fn local_functions_can_recurse() {
        let in_block = "{
            دالة ع(ن) {
                إذا ن أصغر_أو_يساوي 0 إذن { ارجع 0 } أنهي
                ارجع ع(ن ناقص 1) زائد 1
            }
            ع(3)
        }";
        assert_eq!(run(in_block), Value::int(3));

        let in_function = "دالة خارجية(ن) {
            دالة داخلية(م) {
                إذا م أصغر_أو_يساوي 1 إذن { ارجع 1 } أنهي
                ارجع م ضارب داخلية(م ناقص 1)
            }
            ارجع داخلية(ن)
        }
        خارجية(5)";
        assert_eq!(run(in_function), Value::int(120));
    }

    #[test]
    fn local_functions_stay_local() {
        run_err("{ دالة ف() { ارجع 1 } }\nف()", ErrorKind::UnresolvedName);
    }

    #[test]
    fn redeclaring_a_function_fails() {
        run_err(
            "دالة ف() { ارجع 1 }\nدالة ف() { ارجع 2 }",
            ErrorKind::Redeclaration,
        );
    }

    #[test]
    fn non_functions_cannot_be_called() {
        run_err("متغير س تعيين 1\nس()", ErrorKind::TypeCoercion);
        run_err("مجهول()", ErrorKind::UnresolvedName);
    }
}

mod builtins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_resolve_by_any_spelling() {
        assert_eq!(run("طول([1، 2، 3])"), Value::int(3));
        assert_eq!(run("حجم(\"أبت\")"), Value::int(3));
        assert_eq!(run("نوع(1.5)"), Value::string("عدد_عائم"));
    }

    #[test]
    fn math_builtins_are_callable_from_programs() {
        assert_eq!(run("الأكبر(3، 7) زائد الأصغر(3، 7)"), Value::int(10));
        assert_eq!(run("تقريب(2.5)"), Value::int(3));
        assert_eq!(run("هل_يساوي(إجمع(2، 2)، 4)"), Value::Bool(true));
        assert_eq!(run("متغير س تعيين 5\nزيادة_قبلية(س)\nس"), Value::int(5));
    }

    #[test]
    fn user_functions_shadow_builtins() {
        assert_eq!(run("دالة طول(س) { ارجع 0 }\nطول([1])"), Value::int(0));
    }

    #[test]
    fn builtins_take_no_named_arguments() {
        run_err("طول(س تعيين [1])", ErrorKind::UnresolvedName);
    }
}

mod foreign {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Exposes `رياضيات::مربع` and a member that always fails.
    struct MathHost;

    impl InteropBoundary for MathHost {
        fn resolve_alias(&self, alias: &str) -> Option<MemberHandle> {
            match alias {
                "رياضيات::مربع" => Some(MemberHandle::new(1, alias)),
                "رياضيات::معطل" => Some(MemberHandle::new(2, alias)),
                _ => None,
            }
        }

        fn invoke(
            &self,
            handle: &MemberHandle,
            receiver: Option<&Value>,
            args: &[Value],
        ) -> Result<Value, BugError> {
            assert!(receiver.is_none());
            match (handle.id(), args) {
                (1, [Value::Number(n)]) => {
                    Ok(Value::number(n.binary(naftah_ir::BinaryOp::Mul, n)?))
                }
                _ => Err(invocation_failed(handle.alias(), "معطل")),
            }
        }
    }

    fn eval(source: &str) -> Result<Value, BugError> {
        let config = InterpreterConfig::default()
            .print_handler(silent_handler())
            .interop(Rc::new(MathHost));
        Interpreter::with_config(config).eval_source(source)
    }

    #[test]
    fn qualified_calls_reach_the_host() {
        assert_eq!(eval("رياضيات::مربع(7)").unwrap(), Value::int(49));
    }

    #[test]
    fn host_failures_surface_as_invocation_errors() {
        let err = eval("رياضيات::معطل()").unwrap_err();
        assert!(err.is(ErrorKind::Invocation));
        assert!(err.position.is_some());
    }

    #[test]
    fn unknown_members_are_unresolved() {
        let err = eval("رياضيات::جذر(4)").unwrap_err();
        assert!(err.is(ErrorKind::UnresolvedName));
        run_err("جافا::لغة::نظام(1)", ErrorKind::UnresolvedName);
    }
}
