#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use std::cmp::Ordering;

use naftah_diagnostic::{division_by_zero, ErrorKind};
use naftah_ir::{BinaryOp, NumberLit};
use proptest::prelude::*;

use super::*;
use crate::environment::Mutability;

fn field(name: &str, value: Value, mutability: Mutability) -> (String, DeclaredVariable) {
    (name.to_owned(), DeclaredVariable::new(value, mutability, None))
}

mod numbers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers_take_the_narrowest_width() {
        assert_eq!(Number::from_i64(5).width(), Width::Byte);
        assert_eq!(Number::from_i64(300).width(), Width::Short);
        assert_eq!(Number::from_i64(70_000).width(), Width::Int);
        assert_eq!(Number::from_i64(5_000_000_000).width(), Width::Long);
        assert_eq!(Number::from_i64_at_least(5, Width::Long).width(), Width::Long);
    }

    #[test]
    fn literals() {
        let hex = Number::from_literal(&NumberLit::radix("ff", 16)).unwrap();
        assert_eq!(hex.to_i64(), Some(255));
        let small = Number::from_literal(&NumberLit::decimal("1.5")).unwrap();
        assert_eq!(small.width(), Width::Float);
        let precise = Number::from_literal(&NumberLit::decimal("0.1234567891")).unwrap();
        assert_eq!(precise.width(), Width::Double);
        let huge = Number::from_literal(&NumberLit::decimal("123456789012345678901234567890"));
        assert!(huge.is_ok());
    }

    #[test]
    fn text_parsing() {
        assert_eq!(Number::parse_text(" 42 ").and_then(|n| n.to_i64()), Some(42));
        assert_eq!(
            Number::parse_text("2.5").map(|n| n.to_f64()),
            Some(2.5)
        );
        assert!(Number::parse_text("").is_none());
        assert!(Number::parse_text("أ").is_none());
    }

    #[test]
    fn declared_width_conversion() {
        let n = Number::from_i64(300);
        assert!(n.convert_to(Width::Byte).is_none());
        assert!(matches!(n.convert_to(Width::Long), Some(Number::Long(300))));
        assert!(matches!(n.convert_to(Width::Double), Some(Number::Double(v)) if v == 300.0));
        assert!(Number::Double(1.5).convert_to(Width::Int).is_none());
    }

    #[test]
    fn overflow_widens() {
        let max = Number::Long(i64::MAX);
        let sum = max.binary(BinaryOp::Add, &Number::from_i64(1)).unwrap();
        assert_eq!(sum.width(), Width::Big);
        assert_eq!(sum.render(NumberStyle::Latin), "9223372036854775808");
        assert_eq!(Number::Byte(i8::MAX).step(1).width(), Width::Short);
    }

    #[test]
    fn integer_division_truncates() {
        let err = Number::from_i64(1)
            .binary(BinaryOp::Div, &Number::from_i64(0))
            .unwrap_err();
        assert!(err.is(ErrorKind::Arithmetic));
        assert_eq!(
            Number::from_i64(7)
                .binary(BinaryOp::Div, &Number::from_i64(2))
                .unwrap()
                .to_i64(),
            Some(3)
        );
    }

    #[test]
    fn comparison_crosses_widths() {
        let big = Number::Big(num_bigint::BigInt::from(10));
        assert_eq!(big.compare(&Number::Byte(10)), Some(Ordering::Equal));
        assert_eq!(Number::Double(0.5).compare(&Number::Byte(1)), Some(Ordering::Less));
        assert_eq!(Number::Double(f64::NAN).compare(&Number::Byte(1)), None);
    }

    #[test]
    fn rendering() {
        assert_eq!(Number::Double(2.0).render(NumberStyle::Latin), "2");
        assert_eq!(Number::Double(-0.0).render(NumberStyle::Latin), "0");
        assert_eq!(Number::Double(1.23456).render(NumberStyle::Latin), "1٫235");
        assert_eq!(Number::from_i64(1990).render(NumberStyle::ArabicIndic), "١٩٩٠");
    }

    proptest! {
        #[test]
        fn from_i64_round_trips(n in any::<i64>()) {
            prop_assert_eq!(Number::from_i64(n).to_i64(), Some(n));
        }

        #[test]
        fn negation_is_an_involution(n in any::<i64>()) {
            let twice = Number::from_i64(n).neg().neg();
            prop_assert_eq!(twice.compare(&Number::from_i64(n)), Some(Ordering::Equal));
        }
    }
}

mod truthiness {
    use super::*;

    #[test]
    fn empty_and_zero_are_false() {
        for value in [
            Value::None,
            Value::NaN,
            Value::Bool(false),
            Value::int(0),
            Value::double(0.0),
            Value::Char(0),
            Value::string(""),
            Value::list(vec![]),
            Value::map(vec![]),
        ] {
            assert!(!value.is_truthy(), "{value:?} should be falsy");
        }
    }

    #[test]
    fn everything_else_is_true() {
        for value in [
            Value::Bool(true),
            Value::int(-1),
            Value::string("0"),
            Value::tuple(vec![Value::None]),
            Value::error(division_by_zero()),
        ] {
            assert!(value.is_truthy(), "{value:?} should be truthy");
        }
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_compare_across_widths_and_kinds() {
        assert!(Value::int(1).loose_eq(&Value::Number(Number::Long(1))));
        assert!(Value::int(1).loose_eq(&Value::double(1.0)));
        assert!(Value::Bool(true).loose_eq(&Value::int(1)));
        assert!(Value::Char(65).loose_eq(&Value::int(65)));
        assert!(Value::Char(65).loose_eq(&Value::string("A")));
    }

    #[test]
    fn nan_equals_nothing() {
        assert!(!Value::NaN.loose_eq(&Value::NaN));
        assert!(!Value::None.loose_eq(&Value::NaN));
        assert!(Value::None.loose_eq(&Value::None));
    }

    #[test]
    fn sets_ignore_order() {
        let a = Value::set(vec![Value::int(1), Value::int(2)]);
        let b = Value::set(vec![Value::int(2), Value::int(1), Value::int(2)]);
        assert!(a.loose_eq(&b));
    }

    #[test]
    fn maps_keep_the_last_value_of_a_repeated_key() {
        let map = Value::map(vec![
            (Value::string("أ"), Value::int(1)),
            (Value::string("أ"), Value::int(2)),
        ]);
        assert_eq!(map.len(), Some(1));
        assert!(matches!(
            map.index(&Value::string("أ")).unwrap(),
            Lookup::Found(v) if v == Value::int(2)
        ));
    }
}

mod characters {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_plane_only() {
        assert_eq!(Value::char('ب').unwrap(), Value::Char(0x0628));
        assert!(Value::char('😀').unwrap_err().is(ErrorKind::InvalidValue));
    }

    #[test]
    fn lone_surrogates_render_as_replacement() {
        assert_eq!(char_of(0xD800), char::REPLACEMENT_CHARACTER);
    }
}

mod access {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_and_large_indices_are_out_of_bounds() {
        let list = Value::list(vec![Value::int(1)]);
        assert!(matches!(list.index(&Value::int(-1)).unwrap(), Lookup::Missing(_)));
        assert!(matches!(list.index(&Value::int(1)).unwrap(), Lookup::Missing(_)));
        let err = list.index(&Value::string("0")).unwrap_err();
        assert!(err.is(ErrorKind::TypeCoercion));
    }

    #[test]
    fn strings_index_by_utf16_unit() {
        let s = Value::string("نفطة");
        assert!(matches!(
            s.index(&Value::int(1)).unwrap(),
            Lookup::Found(Value::Char(0x0641))
        ));
    }

    #[test]
    fn tuples_and_strings_are_read_only() {
        let tuple = Value::tuple(vec![Value::int(1)]);
        assert!(tuple.set_index(&Value::int(0), Value::int(2)).is_err());
        assert!(Value::string("أ").set_index(&Value::int(0), Value::int(2)).is_err());
    }

    #[test]
    fn object_fields_enforce_mutability() {
        let object = Value::object(vec![
            field("أ", Value::int(1), Mutability::Mutable),
            field("ب", Value::int(2), Mutability::Immutable),
        ]);
        object.set_field("أ", Value::int(10)).unwrap();
        assert!(matches!(
            object.field("أ").unwrap(),
            Lookup::Found(v) if v == Value::int(10)
        ));
        let err = object.set_field("ب", Value::int(20)).unwrap_err();
        assert!(err.is(ErrorKind::ImmutableAssignment));
        let err = object.set_field("ت", Value::int(0)).unwrap_err();
        assert!(err.is(ErrorKind::UnresolvedName));
    }

    #[test]
    fn maps_grow_on_assignment() {
        let map = Value::map(vec![]);
        map.set_field("مفتاح", Value::int(1)).unwrap();
        assert_eq!(map.len(), Some(1));
    }
}

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markers_and_scalars() {
        assert_eq!(Value::None.to_string(), NULL_MARKER);
        assert_eq!(Value::NaN.to_string(), NAN_MARKER);
        assert_eq!(Value::Bool(true).to_string(), "صحيح");
        assert_eq!(Value::Char(0x0628).to_string(), "ب");
    }

    #[test]
    fn collections_are_labeled_at_the_top_level_only() {
        let nested = Value::list(vec![Value::int(1), Value::tuple(vec![Value::int(2)])]);
        assert_eq!(nested.to_string(), "قائمة: [1, (2)]");
        let map = Value::map(vec![(Value::string("أ"), Value::int(1))]);
        assert_eq!(map.to_string(), "مصفوفة ترابطية: {أ=1}");
    }

    #[test]
    fn objects_render_their_fields() {
        let object = Value::object(vec![field("س", Value::int(1), Mutability::Mutable)]);
        assert_eq!(object.to_string(), "كائن: {س=1}");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::int(1).type_name(), "عدد_قصير_جدا");
        assert_eq!(Value::string("").type_name(), "تسلسل_رموز");
        assert_eq!(Value::object(vec![]).type_name(), "كائن");
    }
}
