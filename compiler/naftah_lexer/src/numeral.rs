//! Numeral normalisation.
//!
//! Source numerals may be written in Western (`0-9`), Arabic-Indic (`٠-٩`)
//! or Extended Arabic-Indic (`۰-۹`) digits, freely mixed, with `.` or `٫`
//! as the decimal separator. Everything is folded to ASCII before a
//! literal reaches the parser.

use naftah_diagnostic::{invalid_digit_for_radix, invalid_radix, BugError};
use naftah_ir::NumberLit;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumeralError {
    #[error("radix '{0}' is outside 2..=36")]
    RadixOutOfRange(String),
    #[error("digit '{digit}' is not valid in radix {radix}")]
    DigitOutOfRange { digit: char, radix: u32 },
}

impl From<NumeralError> for BugError {
    fn from(err: NumeralError) -> Self {
        match err {
            NumeralError::RadixOutOfRange(radix) => invalid_radix(&radix),
            NumeralError::DigitOutOfRange { digit, radix } => invalid_digit_for_radix(digit, radix),
        }
    }
}

/// Fold one digit of any supported script to ASCII. Other characters pass
/// through unchanged.
#[inline]
pub fn fold_digit(c: char) -> char {
    match c {
        '\u{0660}'..='\u{0669}' => ascii_digit(u32::from(c) - 0x0660),
        '\u{06F0}'..='\u{06F9}' => ascii_digit(u32::from(c) - 0x06F0),
        '\u{066B}' => '.',
        _ => c,
    }
}

fn ascii_digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('0')
}

/// Fold every digit and decimal separator in `text` to ASCII.
pub fn normalize_digits(text: &str) -> String {
    text.chars().map(fold_digit).collect()
}

/// Render ASCII digits back in Arabic-Indic script, with `٫` as separator.
pub fn to_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => char::from_u32(0x0660 + (u32::from(c) - u32::from('0'))).unwrap_or(c),
            '.' => '٫',
            other => other,
        })
        .collect()
}

/// Parse a plain decimal numeral.
pub fn decimal_literal(text: &str) -> NumberLit {
    NumberLit::decimal(normalize_digits(text))
}

/// Parse `<digits>'<radix>'`, validating the radix and every digit.
pub fn radix_literal(text: &str) -> Result<NumberLit, NumeralError> {
    let normalized = normalize_digits(text);
    let mut parts = normalized.split('\'');
    let digits = parts.next().unwrap_or_default().to_ascii_lowercase();
    let radix_text = parts.next().unwrap_or_default();

    let radix = radix_text
        .parse::<u32>()
        .ok()
        .filter(|r| (2..=36).contains(r))
        .ok_or_else(|| NumeralError::RadixOutOfRange(radix_text.to_string()))?;

    if let Some(bad) = digits.chars().find(|c| c.to_digit(radix).is_none()) {
        return Err(NumeralError::DigitOutOfRange { digit: bad, radix });
    }

    Ok(NumberLit::radix(digits, radix))
}

#[cfg(test)]
mod tests;
