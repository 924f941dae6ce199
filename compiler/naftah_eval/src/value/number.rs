//! The numeric tower.
//!
//! Integers carry the narrowest width that holds them and widen on demand:
//! an operation on two numbers yields at least the wider operand width, and
//! integer overflow is retried one width up until `Big`. Floating widths sit
//! above every integral width.

use std::cmp::Ordering;
use std::fmt;

use naftah_diagnostic::{
    division_by_zero, invalid_value, modulo_by_zero, unsupported_operand, unsupported_operands,
    BugError,
};
use naftah_ir::{BinaryOp, NumberLit, TypeName};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

/// Largest exponent evaluated exactly on big integers.
const MAX_EXACT_EXPONENT: u32 = 100_000;

/// Largest shift amount accepted by `<<` and `>>`.
const MAX_SHIFT: i64 = 4096;

/// Numeric width, ordered by promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    Byte,
    Short,
    Int,
    Long,
    Big,
    Float,
    Double,
}

impl Width {
    pub const fn is_integral(self) -> bool {
        !matches!(self, Width::Float | Width::Double)
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            Width::Byte => TypeName::Byte.spelling(),
            Width::Short => TypeName::Short.spelling(),
            Width::Int => TypeName::Int.spelling(),
            Width::Long => TypeName::Long.spelling(),
            Width::Big => "عدد_كبير",
            Width::Float => TypeName::Float.spelling(),
            Width::Double => TypeName::Double.spelling(),
        }
    }

    /// Width named by a declared numeric type.
    pub const fn from_type(ty: TypeName) -> Option<Width> {
        match ty {
            TypeName::Byte => Some(Width::Byte),
            TypeName::Short => Some(Width::Short),
            TypeName::Int => Some(Width::Int),
            TypeName::Long => Some(Width::Long),
            TypeName::Float => Some(Width::Float),
            TypeName::Double => Some(Width::Double),
            _ => None,
        }
    }
}

/// Digit script used when rendering numbers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NumberStyle {
    /// `0-9`.
    #[default]
    Latin,
    /// `٠-٩`.
    ArabicIndic,
}

#[derive(Clone, Debug)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Big(BigInt),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn width(&self) -> Width {
        match self {
            Number::Byte(_) => Width::Byte,
            Number::Short(_) => Width::Short,
            Number::Int(_) => Width::Int,
            Number::Long(_) => Width::Long,
            Number::Big(_) => Width::Big,
            Number::Float(_) => Width::Float,
            Number::Double(_) => Width::Double,
        }
    }

    #[inline]
    pub fn is_integral(&self) -> bool {
        self.width().is_integral()
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Byte(n) => *n == 0,
            Number::Short(n) => *n == 0,
            Number::Int(n) => *n == 0,
            Number::Long(n) => *n == 0,
            Number::Big(n) => n.is_zero(),
            Number::Float(n) => *n == 0.0,
            Number::Double(n) => *n == 0.0,
        }
    }

    /// Integral value as `i64`; floats are truncated toward zero.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::Byte(n) => Some(i64::from(*n)),
            Number::Short(n) => Some(i64::from(*n)),
            Number::Int(n) => Some(i64::from(*n)),
            Number::Long(n) => Some(*n),
            Number::Big(n) => n.to_i64(),
            Number::Float(n) => n.to_i64(),
            Number::Double(n) => n.to_i64(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Byte(n) => f64::from(*n),
            Number::Short(n) => f64::from(*n),
            Number::Int(n) => f64::from(*n),
            Number::Long(n) => n.to_f64().unwrap_or(f64::NAN),
            Number::Big(n) => n.to_f64().unwrap_or(f64::NAN),
            Number::Float(n) => f64::from(*n),
            Number::Double(n) => *n,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing to f32 is the point of the Float width"
    )]
    fn to_f32(&self) -> f32 {
        match self {
            Number::Float(n) => *n,
            other => other.to_f64() as f32,
        }
    }

    /// Exact integral value; `None` for floating widths.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Number::Big(n) => Some(n.clone()),
            Number::Float(_) | Number::Double(_) => None,
            other => other.to_i64().map(BigInt::from),
        }
    }

    /// The narrowest integral width holding `value`.
    pub fn from_i64(value: i64) -> Number {
        Number::from_i64_at_least(value, Width::Byte)
    }

    /// The narrowest integral width holding `value` that is not below `min`.
    pub fn from_i64_at_least(value: i64, min: Width) -> Number {
        if min <= Width::Byte {
            if let Ok(n) = i8::try_from(value) {
                return Number::Byte(n);
            }
        }
        if min <= Width::Short {
            if let Ok(n) = i16::try_from(value) {
                return Number::Short(n);
            }
        }
        if min <= Width::Int {
            if let Ok(n) = i32::try_from(value) {
                return Number::Int(n);
            }
        }
        if min <= Width::Long {
            return Number::Long(value);
        }
        Number::Big(BigInt::from(value))
    }

    pub fn from_big(value: BigInt) -> Number {
        Number::from_big_at_least(value, Width::Byte)
    }

    pub fn from_big_at_least(value: BigInt, min: Width) -> Number {
        if min < Width::Big {
            if let Some(small) = value.to_i64() {
                return Number::from_i64_at_least(small, min);
            }
        }
        Number::Big(value)
    }

    /// Numeric literal to value. Decimals take `Float` when the `f32`
    /// reading of the literal prints back to the same decimal value.
    pub fn from_literal(lit: &NumberLit) -> Result<Number, BugError> {
        let parsed = if lit.is_decimal {
            parse_decimal(&lit.digits)
        } else {
            BigInt::parse_bytes(lit.digits.as_bytes(), lit.radix).map(Number::from_big)
        };
        parsed.ok_or_else(|| invalid_value(format!("العدد '{lit}' غير صالح.")))
    }

    /// Read a number out of text, as `"2" ** 3` does with its operands.
    pub fn parse_text(text: &str) -> Option<Number> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.contains(['.', 'e', 'E']) {
            return parse_decimal(text);
        }
        BigInt::parse_bytes(text.as_bytes(), 10).map(Number::from_big)
    }

    /// Convert to a declared width, if the value is representable there.
    pub fn convert_to(&self, width: Width) -> Option<Number> {
        match width {
            Width::Float => Some(Number::Float(self.to_f32())),
            Width::Double => Some(Number::Double(self.to_f64())),
            Width::Big => self.to_bigint().map(Number::Big),
            integral => {
                let value = self.to_bigint()?.to_i64()?;
                let converted = Number::from_i64_at_least(value, integral);
                (converted.width() == integral).then_some(converted)
            }
        }
    }

    /// Arithmetic, bitwise and element-wise operators on two numbers.
    pub fn binary(&self, op: BinaryOp, rhs: &Number) -> Result<Number, BugError> {
        match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                if self.is_integral() && rhs.is_integral() {
                    integral_arith(op, self, rhs)
                } else {
                    floating_arith(op, self, rhs)
                }
            }
            BinaryOp::Pow => Ok(power(self, rhs)),
            op if op.is_bitwise() || op.is_elementwise() => bitwise(op, self, rhs),
            _ => Err(unsupported_operands(
                op.as_symbol(),
                self.width().type_name(),
                rhs.width().type_name(),
            )),
        }
    }

    pub fn neg(&self) -> Number {
        match self {
            Number::Float(n) => Number::Float(-n),
            Number::Double(n) => Number::Double(-n),
            integral => {
                let width = integral.width();
                match integral.to_i64().and_then(i64::checked_neg) {
                    Some(n) => Number::from_i64_at_least(n, width),
                    None => Number::from_big_at_least(
                        -integral.to_bigint().unwrap_or_default(),
                        width,
                    ),
                }
            }
        }
    }

    pub fn bit_not(&self) -> Result<Number, BugError> {
        match self.to_bigint() {
            Some(n) => Ok(Number::from_big_at_least(!n, self.width())),
            None => Err(unsupported_operand("~", self.width().type_name())),
        }
    }

    /// `self + delta`, keeping at least the current width.
    pub fn step(&self, delta: i8) -> Number {
        match self {
            Number::Float(n) => Number::Float(n + f32::from(delta)),
            Number::Double(n) => Number::Double(n + f64::from(delta)),
            integral => {
                let width = integral.width();
                match integral.to_i64().and_then(|n| n.checked_add(i64::from(delta))) {
                    Some(n) => Number::from_i64_at_least(n, width),
                    None => Number::from_big_at_least(
                        integral.to_bigint().unwrap_or_default() + BigInt::from(delta),
                        width,
                    ),
                }
            }
        }
    }

    /// Numeric comparison across widths. `None` when a float is NaN.
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        if self.is_integral() && other.is_integral() {
            if let (Number::Big(_), _) | (_, Number::Big(_)) = (self, other) {
                return Some(self.to_bigint()?.cmp(&other.to_bigint()?));
            }
            return Some(self.to_i64()?.cmp(&other.to_i64()?));
        }
        self.to_f64().partial_cmp(&other.to_f64())
    }

    /// Whether a floating value is NaN.
    pub fn is_nan(&self) -> bool {
        match self {
            Number::Float(n) => n.is_nan(),
            Number::Double(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn render(&self, style: NumberStyle) -> String {
        let text = match self {
            Number::Byte(n) => n.to_string(),
            Number::Short(n) => n.to_string(),
            Number::Int(n) => n.to_string(),
            Number::Long(n) => n.to_string(),
            Number::Big(n) => n.to_string(),
            Number::Float(n) => format_decimal(f64::from(*n)),
            Number::Double(n) => format_decimal(*n),
        };
        match style {
            NumberStyle::Latin => text,
            NumberStyle::ArabicIndic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                    None => c,
                })
                .collect(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NumberStyle::Latin))
    }
}

fn parse_decimal(text: &str) -> Option<Number> {
    let wide: f64 = text.parse().ok()?;
    let narrow: f32 = text.parse().ok()?;
    let exact = narrow.is_finite() && narrow.to_string().parse::<f64>().ok() == Some(wide);
    Some(if exact {
        Number::Float(narrow)
    } else {
        Number::Double(wide)
    })
}

/// At most three fraction digits, `٫` as separator, no trailing zeros.
fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "ليس_رقم".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    trimmed.replace('.', "٫")
}

fn integral_arith(op: BinaryOp, a: &Number, b: &Number) -> Result<Number, BugError> {
    let min = a.width().max(b.width());
    if matches!(op, BinaryOp::Div) && b.is_zero() {
        return Err(division_by_zero());
    }
    if matches!(op, BinaryOp::Mod) && b.is_zero() {
        return Err(modulo_by_zero());
    }

    if min < Width::Big {
        if let (Some(x), Some(y)) = (a.to_i64(), b.to_i64()) {
            let exact = match op {
                BinaryOp::Add => x.checked_add(y),
                BinaryOp::Sub => x.checked_sub(y),
                BinaryOp::Mul => x.checked_mul(y),
                BinaryOp::Div => x.checked_div(y),
                _ => x.checked_rem(y),
            };
            if let Some(n) = exact {
                return Ok(Number::from_i64_at_least(n, min));
            }
        }
    }

    let (Some(x), Some(y)) = (a.to_bigint(), b.to_bigint()) else {
        return Err(unsupported_operands(
            op.as_symbol(),
            a.width().type_name(),
            b.width().type_name(),
        ));
    };
    let result = match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => x / y,
        _ => x % y,
    };
    Ok(Number::from_big_at_least(result, min))
}

fn floating_arith(op: BinaryOp, a: &Number, b: &Number) -> Result<Number, BugError> {
    match op {
        BinaryOp::Div if b.is_zero() => return Err(division_by_zero()),
        BinaryOp::Mod if b.is_zero() => return Err(modulo_by_zero()),
        _ => {}
    }

    // Big with Float widens to Double: f32 cannot hold most big integers.
    let involves_big = a.width() == Width::Big || b.width() == Width::Big;
    if a.width().max(b.width()) == Width::Float && !involves_big {
        let (x, y) = (a.to_f32(), b.to_f32());
        let narrow = apply_float(op, x, y);
        if narrow.is_finite() || !(x.is_finite() && y.is_finite()) {
            return Ok(Number::Float(narrow));
        }
    }
    Ok(Number::Double(apply_float(op, a.to_f64(), b.to_f64())))
}

fn apply_float<F>(op: BinaryOp, x: F, y: F) -> F
where
    F: std::ops::Add<Output = F>
        + std::ops::Sub<Output = F>
        + std::ops::Mul<Output = F>
        + std::ops::Div<Output = F>
        + std::ops::Rem<Output = F>,
{
    match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => x / y,
        _ => x % y,
    }
}

/// Integral base with a non-negative integral exponent stays integral,
/// anything else is a `Double`.
fn power(base: &Number, exponent: &Number) -> Number {
    if base.is_integral() && exponent.is_integral() {
        let min = base.width().max(exponent.width());
        if let Some(exp) = exponent.to_bigint().and_then(|e| e.to_u32()) {
            if let Some(n) = base.to_i64().and_then(|b| b.checked_pow(exp)) {
                if min < Width::Big {
                    return Number::from_i64_at_least(n, min);
                }
            }
            if exp <= MAX_EXACT_EXPONENT {
                if let Some(b) = base.to_bigint() {
                    return Number::from_big_at_least(b.pow(exp), min);
                }
            }
        }
    }
    Number::Double(base.to_f64().powf(exponent.to_f64()))
}

fn bitwise(op: BinaryOp, a: &Number, b: &Number) -> Result<Number, BugError> {
    let (Some(x), Some(y)) = (a.to_bigint(), b.to_bigint()) else {
        return Err(unsupported_operands(
            op.as_symbol(),
            a.width().type_name(),
            b.width().type_name(),
        ));
    };
    let min = a.width().max(b.width());
    let result = match op {
        BinaryOp::BitAnd | BinaryOp::ElementMul => x & y,
        BinaryOp::BitOr => x | y,
        BinaryOp::BitXor | BinaryOp::ElementAdd => x ^ y,
        BinaryOp::ElementSub => x ^ !y,
        BinaryOp::ElementMod => x & (y - BigInt::one()),
        BinaryOp::Shl => x << shift_amount(&y)?,
        _ => x >> shift_amount(&y)?,
    };
    Ok(Number::from_big_at_least(result, min))
}

fn shift_amount(amount: &BigInt) -> Result<usize, BugError> {
    amount
        .to_i64()
        .filter(|n| (0..=MAX_SHIFT).contains(n))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            invalid_value(format!(
                "مقدار الإزاحة ({amount}) يجب أن يكون بين 0 و {MAX_SHIFT}."
            ))
        })
}
