//! Indexing and field access on values.
//!
//! Reads distinguish a lookup that found nothing ([`Lookup::Missing`]) from
//! a lookup that makes no sense at all (an `Err`). Null-safe chains turn the
//! former into `None`; the latter always propagates.

use naftah_diagnostic::{
    immutable_assignment, index_out_of_bounds, key_not_found, not_indexable, unresolved_name,
    unsupported_operand, BugError,
};

use super::Value;
use crate::environment::coerce_declared;

/// Result of a read that may legitimately find nothing.
#[derive(Debug)]
pub enum Lookup {
    Found(Value),
    /// Nothing there; the error to raise when the access is not null-safe.
    Missing(BugError),
}

impl Value {
    /// `self[key]`.
    pub fn index(&self, key: &Value) -> Result<Lookup, BugError> {
        match self {
            Value::List(items) | Value::Set(items) => {
                let items = items.borrow();
                Ok(position(key, items.len())?.map_or_else(
                    |raw| Lookup::Missing(index_out_of_bounds(raw, items.len())),
                    |i| Lookup::Found(items[i].clone()),
                ))
            }
            Value::Tuple(items) => Ok(position(key, items.len())?.map_or_else(
                |raw| Lookup::Missing(index_out_of_bounds(raw, items.len())),
                |i| Lookup::Found(items[i].clone()),
            )),
            Value::Str(s) => {
                let units: Vec<u16> = s.encode_utf16().collect();
                Ok(position(key, units.len())?.map_or_else(
                    |raw| Lookup::Missing(index_out_of_bounds(raw, units.len())),
                    |i| Lookup::Found(Value::Char(units[i])),
                ))
            }
            Value::Map(entries) => Ok(entries
                .borrow()
                .iter()
                .find(|(k, _)| k.loose_eq(key))
                .map_or_else(
                    || Lookup::Missing(key_not_found(&key.to_string())),
                    |(_, v)| Lookup::Found(v.clone()),
                )),
            Value::Object(_) => match key {
                Value::Str(name) => self.field(name),
                other => Err(not_indexable(other.type_name())),
            },
            other => Err(not_indexable(other.type_name())),
        }
    }

    /// `self:name`.
    pub fn field(&self, name: &str) -> Result<Lookup, BugError> {
        match self {
            Value::Object(fields) => Ok(fields
                .borrow()
                .iter()
                .find(|(n, _)| n == name)
                .map_or_else(
                    || Lookup::Missing(unresolved_name(name)),
                    |(_, field)| Lookup::Found(field.value.clone()),
                )),
            Value::Map(_) => self.index(&Value::string(name)),
            other => Err(not_indexable(other.type_name())),
        }
    }

    /// `self[key] تعيين value`.
    pub fn set_index(&self, key: &Value, value: Value) -> Result<(), BugError> {
        match self {
            Value::List(items) => {
                let mut items = items.borrow_mut();
                let len = items.len();
                match position(key, len)? {
                    Ok(i) => {
                        items[i] = value;
                        Ok(())
                    }
                    Err(raw) => Err(index_out_of_bounds(raw, len)),
                }
            }
            Value::Map(entries) => {
                let mut entries = entries.borrow_mut();
                match entries.iter_mut().find(|(k, _)| k.loose_eq(key)) {
                    Some(slot) => slot.1 = value,
                    None => entries.push((key.clone(), value)),
                }
                Ok(())
            }
            Value::Object(_) => match key {
                Value::Str(name) => self.set_field(name, value),
                other => Err(not_indexable(other.type_name())),
            },
            other => Err(unsupported_operand("[]", other.type_name())),
        }
    }

    /// `self:name تعيين value`. Constant fields reject the write; a field
    /// declared with a type keeps it.
    pub fn set_field(&self, name: &str, value: Value) -> Result<(), BugError> {
        match self {
            Value::Object(fields) => {
                let mut fields = fields.borrow_mut();
                let Some((_, field)) = fields.iter_mut().find(|(n, _)| n == name) else {
                    return Err(unresolved_name(name));
                };
                if !field.mutability.is_mutable() {
                    return Err(immutable_assignment(name));
                }
                field.value = coerce_declared(name, field.declared_type, value)?;
                Ok(())
            }
            Value::Map(_) => self.set_index(&Value::string(name), value),
            other => Err(not_indexable(other.type_name())),
        }
    }
}

/// Resolve an index value against a length: `Ok(Ok(i))` in range,
/// `Ok(Err(raw))` out of range, `Err` when the key is not an integer.
fn position(key: &Value, len: usize) -> Result<Result<usize, i64>, BugError> {
    let raw = match key {
        Value::Number(n) if n.is_integral() => n.to_i64().unwrap_or(i64::MAX),
        Value::Char(c) => i64::from(*c),
        other => return Err(not_indexable(other.type_name())),
    };
    Ok(usize::try_from(raw)
        .ok()
        .filter(|i| *i < len)
        .ok_or(raw))
}
