//! Binary operator implementations for the evaluator.
//!
//! Dispatch is a match over the operand kinds: the kind set is closed, so
//! pattern matching keeps every pairing visible in one place. The order of
//! the checks matters:
//!
//! 1. equality and the logical operators work on any pair;
//! 2. a foreign operand hands the operator to the interop boundary;
//! 3. `None` and `NaN` operands follow the absence rules;
//! 4. collections broadcast or pair up their elements;
//! 5. scalar pairs (numbers, booleans, characters, strings).
//!
//! `و` and `أو` here return one of their operands; the interpreter
//! short-circuits before it ever gets here.

use std::cmp::Ordering;

use naftah_diagnostic::{
    division_by_zero, invalid_value, length_mismatch, modulo_by_zero, unsupported_operands,
    BugError,
};
use naftah_ir::BinaryOp;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::interop::InteropBoundary;
use crate::value::{char_of, Number, NumberStyle, Value};

/// Evaluate `left op right`.
pub fn evaluate_binary(
    left: Value,
    right: Value,
    op: BinaryOp,
    interop: &dyn InteropBoundary,
) -> Result<Value, BugError> {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left.loose_eq(&right))),
        BinaryOp::NotEq => return Ok(Value::Bool(!left.loose_eq(&right))),
        BinaryOp::And => return Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => return Ok(if left.is_truthy() { left } else { right }),
        BinaryOp::Coalesce => return Ok(if left.is_sentinel() { right } else { left }),
        _ => {}
    }

    if matches!(left, Value::Foreign(_)) || matches!(right, Value::Foreign(_)) {
        return delegate_to_host(&left, &right, op, interop);
    }
    if left.is_sentinel() || right.is_sentinel() {
        return eval_absent_binary(left, right, op, interop);
    }
    if is_collection(&left) || is_collection(&right) {
        return eval_collection_binary(&left, &right, op, interop);
    }

    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Bool(b), Value::Number(n)) => eval_number_binary(&bool_number(*b), n, op),
        (Value::Number(n), Value::Bool(b)) => eval_number_binary(n, &bool_number(*b), op),
        (Value::Char(a), Value::Char(b)) => eval_char_binary(&char_number(*a), &char_number(*b), op),
        (Value::Char(c), Value::Number(n)) => {
            if op == BinaryOp::Mul {
                repeat(&char_of(*c).to_string(), n)
            } else {
                eval_char_binary(&char_number(*c), n, op)
            }
        }
        (Value::Number(n), Value::Char(c)) => eval_char_binary(n, &char_number(*c), op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Str(a), Value::Char(c)) => eval_string_binary(a, &char_of(*c).to_string(), op),
        (Value::Char(c), Value::Str(b)) => eval_string_binary(&char_of(*c).to_string(), b, op),
        (Value::Str(s), Value::Number(n)) => eval_string_number_binary(s, n, op),
        (Value::Number(n), Value::Str(s)) => eval_number_string_binary(n, s, op),
        (Value::Str(_), Value::Bool(_)) | (Value::Bool(_), Value::Str(_)) if op == BinaryOp::Add => {
            Ok(concat(&left, &right))
        }
        _ => Err(mismatch(&left, &right, op)),
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> BugError {
    unsupported_operands(op.as_symbol(), left.type_name(), right.type_name())
}

fn is_collection(value: &Value) -> bool {
    matches!(
        value,
        Value::Tuple(_) | Value::List(_) | Value::Set(_) | Value::Map(_)
    )
}

fn is_relational(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
    )
}

fn bool_number(b: bool) -> Number {
    Number::Byte(i8::from(b))
}

fn char_number(c: u16) -> Number {
    Number::from_i64(i64::from(c))
}

fn ordering_holds(op: BinaryOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    }
}

fn concat(left: &Value, right: &Value) -> Value {
    let mut text = left.render(NumberStyle::Latin);
    text.push_str(&right.render(NumberStyle::Latin));
    Value::string(text)
}

// Foreign operands

fn delegate_to_host(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    interop: &dyn InteropBoundary,
) -> Result<Value, BugError> {
    match interop.resolve_alias(op.as_symbol()) {
        Some(handle) => {
            tracing::trace!(alias = handle.alias(), "binary operator delegated to host");
            interop.invoke(&handle, Some(left), std::slice::from_ref(right))
        }
        None => Err(mismatch(left, right, op)),
    }
}

// Absence markers

/// `None` and `NaN` in a binary operator.
///
/// Ordering compares truthiness, `+` with a string concatenates the
/// renderings, and other arithmetic treats `None` as `0` unless a `NaN` is
/// present, which makes the whole result `NaN`.
fn eval_absent_binary(
    left: Value,
    right: Value,
    op: BinaryOp,
    interop: &dyn InteropBoundary,
) -> Result<Value, BugError> {
    if is_relational(op) {
        let truthy = match op {
            BinaryOp::Gt | BinaryOp::GtEq => left.is_truthy(),
            _ => right.is_truthy(),
        };
        return Ok(Value::Bool(truthy));
    }
    if op == BinaryOp::Add && (matches!(left, Value::Str(_)) || matches!(right, Value::Str(_))) {
        return Ok(concat(&left, &right));
    }
    if op.is_arithmetic() && (matches!(left, Value::NaN) || matches!(right, Value::NaN)) {
        return Ok(Value::NaN);
    }
    if op.is_arithmetic() || op.is_bitwise() || op.is_elementwise() {
        let zeroed = |value: Value| {
            if value.is_sentinel() {
                Value::int(0)
            } else {
                value
            }
        };
        return evaluate_binary(zeroed(left), zeroed(right), op, interop);
    }
    Err(mismatch(&left, &right, op))
}

// Numbers, booleans and characters

fn eval_number_binary(a: &Number, b: &Number, op: BinaryOp) -> Result<Value, BugError> {
    if is_relational(op) {
        return Ok(Value::Bool(ordering_holds(op, a.compare(b))));
    }
    a.binary(op, b).map(Value::number)
}

/// Booleans compute as `0`/`1`. Between two booleans the arithmetic
/// result turns back into a boolean; next to a number it stays a number.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Result<Value, BugError> {
    let (a, b) = (bool_number(a), bool_number(b));
    if is_relational(op) {
        return Ok(Value::Bool(ordering_holds(op, a.compare(&b))));
    }
    let result = a.binary(op, &b)?;
    let truthy = match result.to_i64() {
        Some(n) => n != 0,
        None => !result.is_nan(),
    };
    Ok(Value::Bool(truthy))
}

/// Character arithmetic wraps into the 16-bit code unit range.
fn eval_char_binary(a: &Number, b: &Number, op: BinaryOp) -> Result<Value, BugError> {
    if is_relational(op) {
        return Ok(Value::Bool(ordering_holds(op, a.compare(b))));
    }
    a.binary(op, b).map(|n| Value::Char(wrap_unit(&n)))
}

fn wrap_unit(n: &Number) -> u16 {
    // Floats truncate toward zero first, like an integral cast.
    let bits = n
        .to_bigint()
        .or_else(|| n.to_i64().map(BigInt::from))
        .unwrap_or_default();
    (bits & BigInt::from(0xFFFF)).to_u16().unwrap_or(0)
}

// Strings

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Result<Value, BugError> {
    match op {
        BinaryOp::Add => Ok(Value::string(format!("{a}{b}"))),
        BinaryOp::Sub => Ok(Value::string(if b.is_empty() {
            a.to_owned()
        } else {
            a.replacen(b, "", 1)
        })),
        BinaryOp::Div => Ok(split_on(a, b)),
        BinaryOp::Mul | BinaryOp::Mod | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            charwise(a, b, op, false)
        }
        op if op.is_elementwise() => charwise(a, b, op.scalar(), true),
        BinaryOp::Pow => Ok(power_of_text(read_text(a), read_text(b))),
        op if is_relational(op) => Ok(Value::Bool(ordering_holds(
            op,
            Some(a.encode_utf16().cmp(b.encode_utf16())),
        ))),
        _ => Err(unsupported_operands(op.as_symbol(), "تسلسل_رموز", "تسلسل_رموز")),
    }
}

fn split_on(text: &str, separator: &str) -> Value {
    let parts: Vec<Value> = if separator.is_empty() {
        text.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        text.split(separator).map(Value::string).collect()
    };
    Value::list(parts)
}

/// Apply `op` to the code units of two strings, position by position.
/// Without `exact` the longer string is cut to the shorter's length.
fn charwise(a: &str, b: &str, op: BinaryOp, exact: bool) -> Result<Value, BugError> {
    let a: Vec<u16> = a.encode_utf16().collect();
    let b: Vec<u16> = b.encode_utf16().collect();
    if exact && a.len() != b.len() {
        return Err(length_mismatch(op.as_symbol(), a.len(), b.len()));
    }
    let mut units = Vec::with_capacity(a.len().min(b.len()));
    for (&x, &y) in a.iter().zip(&b) {
        let (x, y) = (i64::from(x), i64::from(y));
        let n = match op {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            BinaryOp::Mul => x * y,
            BinaryOp::Div => {
                if y == 0 {
                    return Err(division_by_zero());
                }
                x.div_euclid(y)
            }
            BinaryOp::Mod => {
                if y == 0 {
                    return Err(modulo_by_zero());
                }
                x.rem_euclid(y)
            }
            BinaryOp::BitAnd => x & y,
            BinaryOp::BitOr => x | y,
            _ => x ^ y,
        };
        units.push(u16::try_from(n & 0xFFFF).unwrap_or(0));
    }
    Ok(Value::string(String::from_utf16_lossy(&units)))
}

/// `**` with text operands: blank text counts as `0.0`, unreadable text
/// makes the result `NaN`.
fn power_of_text(base: Option<Number>, exponent: Option<Number>) -> Value {
    match (base, exponent) {
        (Some(base), Some(exponent)) => base
            .binary(BinaryOp::Pow, &exponent)
            .map_or(Value::NaN, Value::number),
        _ => Value::NaN,
    }
}

fn read_text(text: &str) -> Option<Number> {
    if text.trim().is_empty() {
        Some(Number::Double(0.0))
    } else {
        Number::parse_text(text)
    }
}

fn code_point_sum(text: &str) -> Number {
    Number::from_i64(text.chars().map(|c| i64::from(u32::from(c))).sum())
}

fn repeat(text: &str, count: &Number) -> Result<Value, BugError> {
    match count.to_i64().and_then(|n| usize::try_from(n).ok()) {
        Some(n) if count.is_integral() => Ok(Value::string(text.repeat(n))),
        _ => Err(invalid_value(format!(
            "لا يمكن تكرار النص {count} مرة."
        ))),
    }
}

/// Split `text` into `parts` pieces of near-equal length; earlier pieces
/// take the remainder.
fn split_into(text: &str, parts: &Number) -> Result<Value, BugError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(invalid_value("لا يمكن تقسيم نص فارغ."));
    }
    let parts = match parts.to_i64().and_then(|n| usize::try_from(n).ok()) {
        Some(n) if n > 0 && parts.is_integral() => n,
        _ => {
            return Err(invalid_value(format!(
                "عدد الأجزاء ({parts}) يجب أن يكون عددا صحيحا موجبا."
            )))
        }
    };
    if parts > chars.len() {
        return Err(invalid_value(format!(
            "لا يمكن تقسيم نص طوله {} إلى {parts} أجزاء.",
            chars.len()
        )));
    }
    let (base, extra) = (chars.len() / parts, chars.len() % parts);
    let mut pieces = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        pieces.push(Value::string(chars[start..start + len].iter().collect::<String>()));
        start += len;
    }
    Ok(Value::list(pieces))
}

fn eval_string_number_binary(s: &str, n: &Number, op: BinaryOp) -> Result<Value, BugError> {
    match op {
        BinaryOp::Mul => repeat(s, n),
        BinaryOp::Div => split_into(s, n),
        BinaryOp::Pow => Ok(power_of_text(read_text(s), Some(n.clone()))),
        op if is_relational(op) => eval_number_binary(&code_point_sum(s), n, op),
        BinaryOp::Shl | BinaryOp::Shr => eval_number_binary(&code_point_sum(s), n, op),
        op => eval_string_binary(s, &n.render(NumberStyle::Latin), op),
    }
}

fn eval_number_string_binary(n: &Number, s: &str, op: BinaryOp) -> Result<Value, BugError> {
    match op {
        BinaryOp::Pow => Ok(power_of_text(Some(n.clone()), read_text(s))),
        op => eval_number_binary(n, &code_point_sum(s), op),
    }
}

// Collections

fn eval_collection_binary(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    interop: &dyn InteropBoundary,
) -> Result<Value, BugError> {
    if is_relational(op) {
        return Err(mismatch(left, right, op));
    }
    let element_op = op.scalar();
    let apply = |a: &Value, b: &Value| evaluate_binary(a.clone(), b.clone(), element_op, interop);

    match (left, right) {
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Tuple(a), Value::Tuple(b)) if op == BinaryOp::Add => {
            Ok(Value::tuple(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Set(a), Value::Set(b)) if op == BinaryOp::Add => {
            let items: Vec<Value> = a.borrow().iter().chain(b.borrow().iter()).cloned().collect();
            Ok(Value::set(items))
        }
        (Value::Set(a), Value::Set(b)) if op == BinaryOp::Sub => {
            let b = b.borrow();
            Ok(Value::set(
                a.borrow()
                    .iter()
                    .filter(|x| !b.iter().any(|y| x.loose_eq(y)))
                    .cloned()
                    .collect::<Vec<_>>(),
            ))
        }
        (Value::Map(a), Value::Map(b)) if op == BinaryOp::Add => {
            let entries: Vec<(Value, Value)> =
                a.borrow().iter().chain(b.borrow().iter()).cloned().collect();
            Ok(Value::map(entries))
        }
        (Value::List(a), Value::List(b)) => {
            pairwise(&a.borrow(), &b.borrow(), op, apply).map(Value::list)
        }
        (Value::Tuple(a), Value::Tuple(b)) => pairwise(a, b, op, apply).map(Value::tuple),
        (Value::List(items), scalar) if !is_collection(scalar) => {
            broadcast(&items.borrow(), |item| apply(item, scalar)).map(Value::list)
        }
        (scalar, Value::List(items)) if !is_collection(scalar) => {
            broadcast(&items.borrow(), |item| apply(scalar, item)).map(Value::list)
        }
        (Value::Tuple(items), scalar) if !is_collection(scalar) => {
            broadcast(items, |item| apply(item, scalar)).map(Value::tuple)
        }
        (scalar, Value::Tuple(items)) if !is_collection(scalar) => {
            broadcast(items, |item| apply(scalar, item)).map(Value::tuple)
        }
        (Value::Set(items), scalar) if !is_collection(scalar) => {
            broadcast(&items.borrow(), |item| apply(item, scalar)).map(Value::set)
        }
        (scalar, Value::Set(items)) if !is_collection(scalar) => {
            broadcast(&items.borrow(), |item| apply(scalar, item)).map(Value::set)
        }
        _ => Err(mismatch(left, right, op)),
    }
}

fn pairwise(
    a: &[Value],
    b: &[Value],
    op: BinaryOp,
    apply: impl Fn(&Value, &Value) -> Result<Value, BugError>,
) -> Result<Vec<Value>, BugError> {
    if a.len() != b.len() {
        return Err(length_mismatch(op.as_symbol(), a.len(), b.len()));
    }
    a.iter().zip(b).map(|(x, y)| apply(x, y)).collect()
}

fn broadcast(
    items: &[Value],
    apply: impl Fn(&Value) -> Result<Value, BugError>,
) -> Result<Vec<Value>, BugError> {
    items.iter().map(apply).collect()
}
