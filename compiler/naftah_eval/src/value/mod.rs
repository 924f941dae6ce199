//! Runtime values.
//!
//! `Value` is the closed set of kinds the evaluator computes with. Scalars
//! are stored inline; strings and tuples are immutable and shared through
//! `Rc`; lists, sets, maps and objects are mutable in place and shared
//! through [`Heap`], so aliases observe each other's updates.
//!
//! `None` and `NaN` are two distinct absence markers. `None` is the null of
//! the language (every null spelling produces it); `NaN` is the explicit
//! not-a-number. They behave differently under every operator.

mod access;
mod heap;
mod number;

use std::fmt;
use std::rc::Rc;

use naftah_diagnostic::{invalid_value, not_iterable, BugError};
use naftah_ir::{FunctionDecl, SharedArena};

use crate::builtins::BuiltinFunction;
use crate::environment::DeclaredVariable;
use crate::interop::ForeignObject;

pub use access::Lookup;
pub use heap::Heap;
pub use number::{Number, NumberStyle, Width};

/// Rendering of `None`.
pub const NULL_MARKER: &str = "لاشيء";
/// Rendering of `NaN`.
pub const NAN_MARKER: &str = "ليس_رقم";

/// A user function: its declaration plus the arena its body lives in.
#[derive(Debug)]
pub struct FunctionValue {
    pub decl: FunctionDecl,
    pub arena: SharedArena,
}

#[derive(Clone, Debug)]
pub enum Value {
    None,
    NaN,
    Bool(bool),
    /// A UTF-16 code unit; arithmetic on characters wraps at 16 bits.
    Char(u16),
    Number(Number),
    Str(Rc<str>),
    /// Fixed arity, immutable.
    Tuple(Rc<[Value]>),
    List(Heap<Vec<Value>>),
    /// Insertion ordered, no two elements equal.
    Set(Heap<Vec<Value>>),
    /// Insertion ordered, unique keys.
    Map(Heap<Vec<(Value, Value)>>),
    /// Named fields declared in an object literal.
    Object(Heap<Vec<(String, DeclaredVariable)>>),
    Function(Rc<FunctionValue>),
    Builtin(&'static BuiltinFunction),
    /// An error captured by the failure arm of a try.
    Error(Rc<BugError>),
    Foreign(ForeignObject),
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Number(Number::from_i64(n))
    }

    #[inline]
    pub fn double(n: f64) -> Self {
        Value::Number(Number::Double(n))
    }

    /// A number result; a floating NaN becomes the `NaN` marker.
    pub fn number(n: Number) -> Self {
        if n.is_nan() {
            Value::NaN
        } else {
            Value::Number(n)
        }
    }

    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Characters outside the 16-bit range cannot be held in a `Char`.
    pub fn char(c: char) -> Result<Self, BugError> {
        u16::try_from(u32::from(c))
            .map(Value::Char)
            .map_err(|_| invalid_value(format!("الحرف '{c}' خارج النطاق المدعوم للحروف.")))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Build a set, dropping later duplicates.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.iter().any(|existing| existing.loose_eq(&item)) {
                unique.push(item);
            }
        }
        Value::Set(Heap::new(unique))
    }

    /// Build a map; a repeated key keeps its first position and last value.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut unique: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match unique.iter_mut().find(|(k, _)| k.loose_eq(&key)) {
                Some(slot) => slot.1 = value,
                None => unique.push((key, value)),
            }
        }
        Value::Map(Heap::new(unique))
    }

    pub fn object(fields: Vec<(String, DeclaredVariable)>) -> Self {
        Value::Object(Heap::new(fields))
    }

    pub fn error(error: BugError) -> Self {
        Value::Error(Rc::new(error))
    }
}

// Inspection

impl Value {
    /// `None` or `NaN`.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::None | Value::NaN)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None | Value::NaN => false,
            Value::Bool(b) => *b,
            Value::Char(c) => *c != 0,
            Value::Number(n) => !n.is_zero() && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::List(items) | Value::Set(items) => !items.borrow().is_empty(),
            Value::Map(entries) => !entries.borrow().is_empty(),
            Value::Object(fields) => !fields.borrow().is_empty(),
            Value::Function(_) | Value::Builtin(_) | Value::Error(_) | Value::Foreign(_) => true,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::None => NULL_MARKER,
            Value::NaN => NAN_MARKER,
            Value::Bool(_) => "منطقي",
            Value::Char(_) => "حرف",
            Value::Number(n) => n.width().type_name(),
            Value::Str(_) => "تسلسل_رموز",
            Value::Tuple(_) => "تركيبة",
            Value::List(_) => "قائمة",
            Value::Set(_) => "مجموعة",
            Value::Map(_) => "مصفوفة_ترابطية",
            Value::Object(_) => "كائن",
            Value::Function(_) => "دالة",
            Value::Builtin(_) => "دالة_مدمجة",
            Value::Error(_) => "خطأ",
            Value::Foreign(object) => object.type_name.as_ref(),
        }
    }

    /// Element count of strings and collections.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.encode_utf16().count()),
            Value::Tuple(items) => Some(items.len()),
            Value::List(items) | Value::Set(items) => Some(items.borrow().len()),
            Value::Map(entries) => Some(entries.borrow().len()),
            Value::Object(fields) => Some(fields.borrow().len()),
            _ => None,
        }
    }

    /// Snapshot of the values a for-each loop walks: elements, map keys,
    /// object field names or string characters.
    pub fn iteration_items(&self) -> Result<Vec<Value>, BugError> {
        match self {
            Value::Tuple(items) => Ok(items.to_vec()),
            Value::List(items) | Value::Set(items) => Ok(items.borrow().clone()),
            Value::Map(entries) => Ok(entries.borrow().iter().map(|(k, _)| k.clone()).collect()),
            Value::Object(fields) => Ok(fields
                .borrow()
                .iter()
                .map(|(name, _)| Value::string(name.as_str()))
                .collect()),
            Value::Str(s) => Ok(s.encode_utf16().map(Value::Char).collect()),
            other => Err(not_iterable(other.type_name())),
        }
    }

    /// Language equality: numbers compare across widths, booleans and
    /// characters compare as numbers, `NaN` equals nothing.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::NaN, _) | (_, Value::NaN) => false,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
                *n == Number::Byte(i8::from(*b))
            }
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Char(c), Value::Number(n)) | (Value::Number(n), Value::Char(c)) => {
                *n == Number::from_i64(i64::from(*c))
            }
            (Value::Char(c), Value::Str(s)) | (Value::Str(s), Value::Char(c)) => {
                let mut units = s.encode_utf16();
                units.next() == Some(*c) && units.next().is_none()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => slices_eq(a, b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || slices_eq(&a.borrow(), &b.borrow()),
            (Value::Set(a), Value::Set(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.loose_eq(y)))
            }
            (Value::Map(a), Value::Map(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(k2, v2)| k.loose_eq(k2) && v.loose_eq(v2))
                    })
            }
            (Value::Object(a), Value::Object(b)) => {
                a.ptr_eq(b) || {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                        && a.iter()
                            .zip(b.iter())
                            .all(|((n1, v1), (n2, v2))| n1 == n2 && v1.value.loose_eq(&v2.value))
                }
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => a == b,
            _ => false,
        }
    }
}

fn slices_eq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.loose_eq(other)
    }
}

// Rendering

impl Value {
    /// Text form used by printing, `إلى_نص` and interpolation.
    pub fn render(&self, style: NumberStyle) -> String {
        let mut out = String::new();
        self.render_into(&mut out, style, true);
        out
    }

    fn render_into(&self, out: &mut String, style: NumberStyle, top_level: bool) {
        match self {
            Value::None => out.push_str(NULL_MARKER),
            Value::NaN => out.push_str(NAN_MARKER),
            Value::Bool(true) => out.push_str("صحيح"),
            Value::Bool(false) => out.push_str("خطأ"),
            Value::Char(c) => out.push(char_of(*c)),
            Value::Number(n) => out.push_str(&n.render(style)),
            Value::Str(s) => out.push_str(s),
            Value::Tuple(items) => {
                if top_level {
                    out.push_str("تركيبة: ");
                }
                render_seq(out, items, style, '(', ')');
            }
            Value::List(items) => {
                if top_level {
                    out.push_str("قائمة: ");
                }
                render_seq(out, &items.borrow(), style, '[', ']');
            }
            Value::Set(items) => {
                if top_level {
                    out.push_str("مجموعة: ");
                }
                render_seq(out, &items.borrow(), style, '{', '}');
            }
            Value::Map(entries) => {
                if top_level {
                    out.push_str("مصفوفة ترابطية: ");
                }
                out.push('{');
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    key.render_into(out, style, false);
                    out.push('=');
                    value.render_into(out, style, false);
                }
                out.push('}');
            }
            Value::Object(fields) => {
                if top_level {
                    out.push_str("كائن: ");
                }
                out.push('{');
                for (i, (name, field)) in fields.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push('=');
                    field.value.render_into(out, style, false);
                }
                out.push('}');
            }
            Value::Function(function) => {
                out.push_str("<دالة ");
                out.push_str(&function.decl.name);
                out.push('>');
            }
            Value::Builtin(builtin) => {
                out.push_str("<دالة مدمجة ");
                out.push_str(builtin.name);
                out.push('>');
            }
            Value::Error(error) => out.push_str(&error.to_string()),
            Value::Foreign(object) => {
                out.push('<');
                out.push_str(&object.type_name);
                out.push('#');
                out.push_str(&object.id.to_string());
                out.push('>');
            }
        }
    }
}

fn render_seq(out: &mut String, items: &[Value], style: NumberStyle, open: char, close: char) {
    out.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.render_into(out, style, false);
    }
    out.push(close);
}

/// The character a code unit stands for; lone surrogates print as U+FFFD.
pub fn char_of(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NumberStyle::Latin))
    }
}

#[cfg(test)]
mod tests;
