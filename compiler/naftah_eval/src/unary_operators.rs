//! Unary operator implementations for the evaluator.
//!
//! Increment and decrement are split in two: [`step_value`] computes the
//! neighbouring value, and the interpreter decides what to write back and
//! which of the two values the expression yields. Applied through
//! [`evaluate_unary`] directly (a literal operand, nothing to write back),
//! the prefix forms yield the stepped value and the postfix forms the
//! operand itself.

use naftah_diagnostic::{not_steppable, unsupported_operand, BugError};
use naftah_ir::UnaryOp;

use crate::value::Value;

/// Evaluate a unary operation.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> Result<Value, BugError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::Plus | UnaryOp::Neg => sign(&value, op),
        UnaryOp::BitNot => bit_not(&value),
        UnaryOp::PreIncrement => step_value(&value, 1, op),
        UnaryOp::PreDecrement => step_value(&value, -1, op),
        UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
            step_value(&value, 1, op)?;
            Ok(value)
        }
    }
}

/// `value + delta` for `++` and `--`. Characters wrap at 16 bits, strings
/// step every code unit, collections step every element.
pub fn step_value(value: &Value, delta: i8, op: UnaryOp) -> Result<Value, BugError> {
    match value {
        Value::Number(n) => Ok(Value::number(n.step(delta))),
        Value::Char(c) => Ok(Value::Char(c.wrapping_add_signed(i16::from(delta)))),
        Value::Str(s) => {
            let units: Vec<u16> = s
                .encode_utf16()
                .map(|u| u.wrapping_add_signed(i16::from(delta)))
                .collect();
            Ok(Value::string(String::from_utf16_lossy(&units)))
        }
        collection @ (Value::Tuple(_) | Value::List(_) | Value::Set(_)) => {
            map_elements(collection, |item| step_value(item, delta, op))
        }
        other => Err(not_steppable(op.as_symbol(), other.type_name())),
    }
}

/// Unary `+` and `-`.
fn sign(value: &Value, op: UnaryOp) -> Result<Value, BugError> {
    let negate = op == UnaryOp::Neg;
    match value {
        Value::None => Ok(if negate {
            Value::double(-0.0)
        } else {
            Value::int(0)
        }),
        Value::NaN | Value::Str(_) => Ok(Value::NaN),
        Value::Number(n) => Ok(if negate {
            Value::number(n.neg())
        } else {
            value.clone()
        }),
        Value::Bool(b) => {
            let n = i64::from(*b);
            Ok(Value::int(if negate { -n } else { n }))
        }
        Value::Char(c) => Ok(Value::Char(if negate { c.wrapping_neg() } else { *c })),
        collection @ (Value::Tuple(_) | Value::List(_) | Value::Set(_)) => {
            map_elements(collection, |item| sign(item, op))
        }
        other => Err(unsupported_operand(op.as_symbol(), other.type_name())),
    }
}

fn bit_not(value: &Value) -> Result<Value, BugError> {
    match value {
        Value::None | Value::NaN => Ok(Value::int(-1)),
        Value::Number(n) => n.bit_not().map(Value::Number),
        Value::Bool(b) => Ok(Value::Bool(!b)),
        Value::Char(c) => Ok(Value::Char(!c)),
        Value::Str(s) => {
            let units: Vec<u16> = s.encode_utf16().map(|u| !u).collect();
            Ok(Value::string(String::from_utf16_lossy(&units)))
        }
        collection @ (Value::Tuple(_) | Value::List(_) | Value::Set(_)) => {
            map_elements(collection, bit_not)
        }
        other => Err(unsupported_operand(UnaryOp::BitNot.as_symbol(), other.type_name())),
    }
}

/// Apply `f` to every element, keeping the collection kind.
fn map_elements(
    collection: &Value,
    f: impl Fn(&Value) -> Result<Value, BugError>,
) -> Result<Value, BugError> {
    match collection {
        Value::Tuple(items) => items
            .iter()
            .map(f)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::tuple),
        Value::List(items) => items
            .borrow()
            .iter()
            .map(f)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        Value::Set(items) => items
            .borrow()
            .iter()
            .map(f)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::set),
        other => Ok(other.clone()),
    }
}
