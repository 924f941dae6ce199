use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn arabic_indic_digits_fold_to_ascii() {
    assert_eq!(normalize_digits("١٢٣"), "123");
    assert_eq!(normalize_digits("۴۵"), "45");
    assert_eq!(normalize_digits("1٢3"), "123");
}

#[test]
fn arabic_decimal_separator_becomes_a_dot() {
    let lit = decimal_literal("٣٫١٤");
    assert_eq!(lit.digits, "3.14");
    assert!(lit.is_decimal);
}

#[test]
fn radix_literal_splits_digits_and_base() {
    let lit = radix_literal("1010'2'").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(lit, NumberLit::radix("1010", 2));

    let lit = radix_literal("7FF'16'").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(lit, NumberLit::radix("7ff", 16));

    let lit = radix_literal("١٠'٨'").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(lit, NumberLit::radix("10", 8));
}

#[test]
fn radix_outside_range_is_rejected() {
    assert_eq!(
        radix_literal("10'37'"),
        Err(NumeralError::RadixOutOfRange("37".to_string()))
    );
    assert_eq!(
        radix_literal("10'1'"),
        Err(NumeralError::RadixOutOfRange("1".to_string()))
    );
}

#[test]
fn digit_beyond_radix_is_rejected() {
    assert_eq!(
        radix_literal("129'2'"),
        Err(NumeralError::DigitOutOfRange { digit: '2', radix: 2 })
    );
}

#[test]
fn arabic_rendering_round_trips() {
    assert_eq!(to_arabic_digits("10000.006"), "١٠٠٠٠٫٠٠٦");
    assert_eq!(normalize_digits(&to_arabic_digits("42.5")), "42.5");
}

proptest! {
    #[test]
    fn folding_preserves_the_numeric_value(n in 0u64..1_000_000_000) {
        let arabic = to_arabic_digits(&n.to_string());
        prop_assert_eq!(normalize_digits(&arabic).parse::<u64>().ok(), Some(n));
    }
}
