//! Builtin function registry.
//!
//! The tables are static arrays: the core builtins here, the arithmetic,
//! comparison and bitwise ones in [`math`]. The name index over both (every
//! spelling and alias) is built once, on first lookup, and is read-only
//! from then on.

mod math;

use std::sync::OnceLock;

use naftah_diagnostic::{
    invalid_value, missing_argument, too_many_arguments, unsupported_operand, BugError,
};
use rustc_hash::FxHashMap;

use crate::interop::InteropBoundary;
use crate::print_handler::PrintHandler;
use crate::value::{Number, NumberStyle, Value};

/// What a builtin may touch besides its arguments.
pub struct BuiltinContext<'a> {
    pub print: &'a PrintHandler,
    pub style: NumberStyle,
    /// Operator builtins hand foreign operands over like the operators do.
    pub interop: &'a dyn InteropBoundary,
}

pub type BuiltinFn = fn(&BuiltinContext<'_>, &[Value]) -> Result<Value, BugError>;

/// A registered builtin.
#[derive(Debug)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    /// Declared parameter type names; a trailing `...` marks a variadic tail.
    pub params: &'static [&'static str],
    pub return_type: &'static str,
    pub call: BuiltinFn,
}

impl BuiltinFunction {
    /// Reject a call whose argument count falls outside `min..=max`.
    fn check_arity(&self, args: &[Value], min: usize, max: usize) -> Result<(), BugError> {
        if args.len() < min {
            let param = self.params.get(args.len()).copied().unwrap_or("?");
            return Err(missing_argument(self.name, param));
        }
        if args.len() > max {
            return Err(too_many_arguments(self.name, max, args.len()));
        }
        Ok(())
    }
}

static BUILTINS: [BuiltinFunction; 8] = [
    BuiltinFunction {
        name: "إطبع",
        aliases: &["اطبع", "أطبع"],
        description: "يطبع القيم مفصولة بمسافة متبوعة بسطر جديد.",
        usage: "إطبع(قيمة، ...)",
        params: &["أي_نمط..."],
        return_type: "عدم",
        call: print,
    },
    BuiltinFunction {
        name: "إلى_نص",
        aliases: &["الى_نص"],
        description: "يحوّل القيمة إلى نص بنفس الشكل الذي تطبع به.",
        usage: "إلى_نص(قيمة)",
        params: &["أي_نمط"],
        return_type: "تسلسل_رموز",
        call: to_text,
    },
    BuiltinFunction {
        name: "طول",
        aliases: &["حجم"],
        description: "عدد عناصر النص أو المجموعة.",
        usage: "طول(قيمة)",
        params: &["أي_نمط"],
        return_type: "عدد_صحيح",
        call: length,
    },
    BuiltinFunction {
        name: "نوع",
        aliases: &[],
        description: "اسم نوع القيمة.",
        usage: "نوع(قيمة)",
        params: &["أي_نمط"],
        return_type: "تسلسل_رموز",
        call: kind,
    },
    BuiltinFunction {
        name: "إضافة",
        aliases: &["اضافة", "أضف"],
        description: "يضيف عنصرا إلى نهاية قائمة أو إلى مجموعة ويعيدها.",
        usage: "إضافة(قائمة، عنصر)",
        params: &["قائمة", "أي_نمط"],
        return_type: "قائمة",
        call: append,
    },
    BuiltinFunction {
        name: "مفاتيح",
        aliases: &[],
        description: "مفاتيح مصفوفة ترابطية أو أسماء حقول كائن.",
        usage: "مفاتيح(مصفوفة_ترابطية)",
        params: &["مصفوفة_ترابطية"],
        return_type: "قائمة",
        call: keys,
    },
    BuiltinFunction {
        name: "قيم",
        aliases: &[],
        description: "قيم مصفوفة ترابطية أو حقول كائن.",
        usage: "قيم(مصفوفة_ترابطية)",
        params: &["مصفوفة_ترابطية"],
        return_type: "قائمة",
        call: values,
    },
    BuiltinFunction {
        name: "مدى",
        aliases: &["نطاق"],
        description: "قائمة الأعداد الصحيحة من البداية إلى النهاية شاملة.",
        usage: "مدى(بداية، نهاية، خطوة)",
        params: &["عدد_طويل", "عدد_طويل", "عدد_طويل"],
        return_type: "قائمة",
        call: range,
    },
];

/// Every builtin, in registration order.
pub fn builtins() -> impl Iterator<Item = &'static BuiltinFunction> {
    BUILTINS.iter().chain(math::MATH.iter())
}

/// Find a builtin by name or alias.
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static BuiltinFunction>> = OnceLock::new();
    INDEX
        .get_or_init(|| {
            let mut index = FxHashMap::default();
            for builtin in builtins() {
                index.insert(builtin.name, builtin);
                for alias in builtin.aliases {
                    index.insert(*alias, builtin);
                }
            }
            tracing::debug!(entries = index.len(), "builtin registry initialised");
            index
        })
        .get(name)
        .copied()
}

fn print(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    let line = args
        .iter()
        .map(|arg| arg.render(ctx.style))
        .collect::<Vec<_>>()
        .join(" ");
    ctx.print.println(&line);
    Ok(Value::None)
}

fn to_text(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[1].check_arity(args, 1, 1)?;
    Ok(Value::string(args[0].render(ctx.style)))
}

fn length(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[2].check_arity(args, 1, 1)?;
    match args[0].len() {
        Some(len) => Ok(Value::Number(Number::from_i64(
            i64::try_from(len).unwrap_or(i64::MAX),
        ))),
        None => Err(unsupported_operand(BUILTINS[2].name, args[0].type_name())),
    }
}

fn kind(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[3].check_arity(args, 1, 1)?;
    Ok(Value::string(args[0].type_name()))
}

fn append(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[4].check_arity(args, 2, 2)?;
    let (target, item) = (&args[0], &args[1]);
    match target {
        Value::List(items) => items.borrow_mut().push(item.clone()),
        Value::Set(items) => {
            let mut items = items.borrow_mut();
            if !items.iter().any(|existing| existing.loose_eq(item)) {
                items.push(item.clone());
            }
        }
        other => return Err(unsupported_operand(BUILTINS[4].name, other.type_name())),
    }
    Ok(target.clone())
}

fn keys(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[5].check_arity(args, 1, 1)?;
    match &args[0] {
        Value::Map(entries) => Ok(Value::list(
            entries.borrow().iter().map(|(k, _)| k.clone()).collect(),
        )),
        Value::Object(fields) => Ok(Value::list(
            fields
                .borrow()
                .iter()
                .map(|(name, _)| Value::string(name.as_str()))
                .collect(),
        )),
        other => Err(unsupported_operand(BUILTINS[5].name, other.type_name())),
    }
}

fn values(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[6].check_arity(args, 1, 1)?;
    match &args[0] {
        Value::Map(entries) => Ok(Value::list(
            entries.borrow().iter().map(|(_, v)| v.clone()).collect(),
        )),
        Value::Object(fields) => Ok(Value::list(
            fields
                .borrow()
                .iter()
                .map(|(_, field)| field.value.clone())
                .collect(),
        )),
        other => Err(unsupported_operand(BUILTINS[6].name, other.type_name())),
    }
}

fn range(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    BUILTINS[7].check_arity(args, 2, 3)?;
    let bound = |value: &Value| match value {
        Value::Number(n) if n.is_integral() => n
            .to_i64()
            .ok_or_else(|| invalid_value("حدود المدى كبيرة جدا.")),
        other => Err(unsupported_operand(BUILTINS[7].name, other.type_name())),
    };
    let start = bound(&args[0])?;
    let end = bound(&args[1])?;
    let step = match args.get(2) {
        Some(step) => bound(step)?,
        None => 1,
    };
    if step <= 0 {
        return Err(invalid_value("خطوة المدى يجب أن تكون أكبر من 0."));
    }
    let mut items = Vec::new();
    let mut current = start;
    while current <= end {
        items.push(Value::int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::list(items))
}
