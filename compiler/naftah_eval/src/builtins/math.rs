//! Arithmetic, comparison and bitwise builtins.
//!
//! Most entries are operators under a name: `إجمع(أ، ب)` goes through the
//! same dispatch as `أ زائد ب`, so every coercion rule of the operator
//! applies to the builtin too. The rest (rounding, roots, signs) work on
//! numbers and booleans only.

use std::cmp::Ordering;

use naftah_diagnostic::{invalid_value, unsupported_operand, BugError};
use naftah_ir::{BinaryOp, UnaryOp};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use super::{BuiltinContext, BuiltinFunction};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::{Number, Value, Width};

const fn entry(
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    params: &'static [&'static str],
    return_type: &'static str,
    call: super::BuiltinFn,
) -> BuiltinFunction {
    BuiltinFunction {
        name,
        aliases: &[],
        description,
        usage,
        params,
        return_type,
        call,
    }
}

const TWO_VALUES: &[&str] = &["أي_نمط", "أي_نمط"];
const ONE_VALUE: &[&str] = &["أي_نمط"];
const ONE_NUMBER: &[&str] = &["عدد"];
const SHIFT: &[&str] = &["عدد", "عدد_صحيح"];

pub(super) static MATH: [BuiltinFunction; 33] = [
    // Operators under a name
    entry("إجمع", "مجموع قيمتين.", "إجمع(ش، ي)", TWO_VALUES, "أي_نمط", add),
    entry("إطرح", "الفرق بين قيمتين.", "إطرح(ش، ي)", TWO_VALUES, "أي_نمط", subtract),
    entry("إضرب", "حاصل ضرب قيمتين.", "إضرب(ش، ي)", TWO_VALUES, "أي_نمط", multiply),
    entry("إقسم", "خارج قسمة قيمتين.", "إقسم(ش، ي)", TWO_VALUES, "أي_نمط", divide),
    entry("باقي_القسمة", "باقي قسمة قيمتين.", "باقي_القسمة(ش، ي)", TWO_VALUES, "أي_نمط", modulo),
    entry("إرفع", "رفع الأساس إلى الأس.", "إرفع(الأساس، الأس)", &["عدد", "عدد_صحيح"], "عدد", power),
    // Numbers
    entry("الأكبر", "أكبر العددين.", "الأكبر(ش، ي)", &["عدد", "عدد"], "عدد", max),
    entry("الأصغر", "أصغر العددين.", "الأصغر(ش، ي)", &["عدد", "عدد"], "عدد", min),
    entry("تقريب", "أقرب عدد صحيح، والنصف يقرب إلى الأعلى.", "تقريب(ش)", ONE_NUMBER, "عدد", round),
    entry("أرضي", "أكبر عدد صحيح لا يتجاوز العدد.", "أرضي(ش)", ONE_NUMBER, "عدد", floor),
    entry("سقف", "أصغر عدد صحيح لا يقل عن العدد.", "سقف(ش)", ONE_NUMBER, "عدد", ceil),
    entry("إنفي", "سالب العدد.", "إنفي(ش)", ONE_NUMBER, "عدد", negate),
    entry("جذر", "الجذر التربيعي؛ ليس_رقم للأعداد السالبة.", "جذر(ش)", ONE_NUMBER, "عدد_عائم_طويل", sqrt),
    entry("القيمة_المطلقة", "القيمة المطلقة للعدد.", "القيمة_المطلقة(ش)", ONE_NUMBER, "عدد", abs),
    entry("إشارة", "-1 أو 0 أو 1 حسب إشارة العدد.", "إشارة(ش)", ONE_NUMBER, "عدد_صحيح", signum),
    entry("هل_صفر", "هل العدد صفر.", "هل_صفر(ش)", ONE_NUMBER, "منطقي", is_zero),
    // Comparison
    entry("هل_يساوي", "هل القيمتان متساويتان.", "هل_يساوي(ش، ي)", TWO_VALUES, "منطقي", equals),
    entry("هل_لا_يساوي", "هل القيمتان مختلفتان.", "هل_لا_يساوي(ش، ي)", TWO_VALUES, "منطقي", not_equals),
    entry("هل_أصغر_من", "هل الأولى أصغر من الثانية.", "هل_أصغر_من(ش، ي)", TWO_VALUES, "منطقي", less_than),
    entry("هل_أصغر_أو_يساوي", "هل الأولى أصغر من الثانية أو تساويها.", "هل_أصغر_أو_يساوي(ش، ي)", TWO_VALUES, "منطقي", less_or_equal),
    entry("هل_أكبر_من", "هل الأولى أكبر من الثانية.", "هل_أكبر_من(ش، ي)", TWO_VALUES, "منطقي", greater_than),
    entry("هل_أكبر_أو_يساوي", "هل الأولى أكبر من الثانية أو تساويها.", "هل_أكبر_أو_يساوي(ش، ي)", TWO_VALUES, "منطقي", greater_or_equal),
    // Bitwise
    entry("و_بتي", "العملية و على مستوى البت.", "و_بتي(ش، ي)", TWO_VALUES, "أي_نمط", bit_and),
    entry("أو_بتي", "العملية أو على مستوى البت.", "أو_بتي(ش، ي)", TWO_VALUES, "أي_نمط", bit_or),
    entry("حصري_أو_بتي", "العملية أو الحصرية على مستوى البت.", "حصري_أو_بتي(ش، ي)", TWO_VALUES, "أي_نمط", bit_xor),
    entry("ليس_بتي", "عكس البتات.", "ليس_بتي(ش)", ONE_VALUE, "أي_نمط", bit_not),
    entry("إزاحة_إلى_اليسار", "إزاحة البتات إلى اليسار.", "إزاحة_إلى_اليسار(ش، عدد_المواضع)", SHIFT, "عدد", shift_left),
    entry("إزاحة_إلى_اليمين", "إزاحة البتات إلى اليمين مع الحفاظ على الإشارة.", "إزاحة_إلى_اليمين(ش، عدد_المواضع)", SHIFT, "عدد", shift_right),
    entry("إزاحة_إلى_اليمين_غير_موقعة", "إزاحة البتات إلى اليمين مع ملء الأصفار.", "إزاحة_إلى_اليمين_غير_موقعة(ش، عدد_المواضع)", SHIFT, "عدد", unsigned_shift_right),
    // Steps; nothing is written back
    entry("زيادة_قبلية", "القيمة بعد زيادتها بواحد.", "زيادة_قبلية(ش)", ONE_VALUE, "أي_نمط", pre_increment),
    entry("زيادة_بعدية", "القيمة نفسها؛ الزيادة لا تُحفظ.", "زيادة_بعدية(ش)", ONE_VALUE, "أي_نمط", post_increment),
    entry("نقصان_قبلي", "القيمة بعد إنقاصها بواحد.", "نقصان_قبلي(ش)", ONE_VALUE, "أي_نمط", pre_decrement),
    entry("نقصان_بعدي", "القيمة نفسها؛ النقصان لا يُحفظ.", "نقصان_بعدي(ش)", ONE_VALUE, "أي_نمط", post_decrement),
];

fn binary(
    index: usize,
    op: BinaryOp,
    ctx: &BuiltinContext<'_>,
    args: &[Value],
) -> Result<Value, BugError> {
    MATH[index].check_arity(args, 2, 2)?;
    evaluate_binary(args[0].clone(), args[1].clone(), op, ctx.interop)
}

fn unary(index: usize, op: UnaryOp, args: &[Value]) -> Result<Value, BugError> {
    MATH[index].check_arity(args, 1, 1)?;
    evaluate_unary(args[0].clone(), op)
}

/// The single numeric argument of builtin `index`. Booleans count as 0/1.
fn number(index: usize, args: &[Value]) -> Result<Number, BugError> {
    let builtin = &MATH[index];
    builtin.check_arity(args, 1, 1)?;
    number_arg(builtin, &args[0])
}

fn number_arg(builtin: &BuiltinFunction, value: &Value) -> Result<Number, BugError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::Bool(b) => Ok(Number::from_i64(i64::from(*b))),
        other => Err(unsupported_operand(builtin.name, other.type_name())),
    }
}

fn add(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(0, BinaryOp::Add, ctx, args)
}

fn subtract(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(1, BinaryOp::Sub, ctx, args)
}

fn multiply(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(2, BinaryOp::Mul, ctx, args)
}

fn divide(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(3, BinaryOp::Div, ctx, args)
}

fn modulo(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(4, BinaryOp::Mod, ctx, args)
}

fn power(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(5, BinaryOp::Pow, ctx, args)
}

/// The first operand wins ties. An incomparable pair (a NaN) gives NaN.
fn pick(index: usize, args: &[Value], replace_on: Ordering) -> Result<Value, BugError> {
    let builtin = &MATH[index];
    builtin.check_arity(args, 2, 2)?;
    let first = number_arg(builtin, &args[0])?;
    let second = number_arg(builtin, &args[1])?;
    Ok(match first.compare(&second) {
        None => Value::NaN,
        Some(ordering) if ordering == replace_on => Value::number(second),
        Some(_) => Value::number(first),
    })
}

fn max(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    pick(6, args, Ordering::Less)
}

fn min(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    pick(7, args, Ordering::Greater)
}

/// Integral numbers pass through; decimals go through `f` and come back as
/// the narrowest integer width.
fn to_integral(index: usize, args: &[Value], f: fn(f64) -> f64) -> Result<Value, BugError> {
    let n = number(index, args)?;
    if n.is_integral() {
        return Ok(Value::number(n));
    }
    BigInt::from_f64(f(n.to_f64()))
        .map(|whole| Value::number(Number::from_big(whole)))
        .ok_or_else(|| invalid_value(format!("لا يمكن تحويل '{n}' إلى عدد صحيح.")))
}

fn round(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    to_integral(8, args, |x| (x + 0.5).floor())
}

fn floor(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    to_integral(9, args, f64::floor)
}

fn ceil(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    to_integral(10, args, f64::ceil)
}

fn negate(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    Ok(Value::number(number(11, args)?.neg()))
}

fn sqrt(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    let x = number(12, args)?.to_f64();
    Ok(if x < 0.0 {
        Value::NaN
    } else {
        Value::double(x.sqrt())
    })
}

fn abs(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    let n = number(13, args)?;
    Ok(match n.compare(&Number::from_i64(0)) {
        Some(Ordering::Less) => Value::number(n.neg()),
        _ => Value::number(n),
    })
}

fn signum(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    let n = number(14, args)?;
    Ok(match n.compare(&Number::from_i64(0)) {
        Some(Ordering::Less) => Value::int(-1),
        Some(Ordering::Equal) => Value::int(0),
        Some(Ordering::Greater) => Value::int(1),
        None => Value::NaN,
    })
}

fn is_zero(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    Ok(Value::Bool(number(15, args)?.is_zero()))
}

fn equals(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(16, BinaryOp::Eq, ctx, args)
}

fn not_equals(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(17, BinaryOp::NotEq, ctx, args)
}

fn less_than(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(18, BinaryOp::Lt, ctx, args)
}

fn less_or_equal(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(19, BinaryOp::LtEq, ctx, args)
}

fn greater_than(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(20, BinaryOp::Gt, ctx, args)
}

fn greater_or_equal(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(21, BinaryOp::GtEq, ctx, args)
}

fn bit_and(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(22, BinaryOp::BitAnd, ctx, args)
}

fn bit_or(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(23, BinaryOp::BitOr, ctx, args)
}

fn bit_xor(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(24, BinaryOp::BitXor, ctx, args)
}

fn bit_not(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    unary(25, UnaryOp::BitNot, args)
}

fn shift_left(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(26, BinaryOp::Shl, ctx, args)
}

fn shift_right(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    binary(27, BinaryOp::Shr, ctx, args)
}

/// Zero-filling right shift. Widths up to `عدد_صحيح` shift as 32 bits,
/// `عدد_طويل` as 64; the shift count wraps at the bit count.
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "reinterpreting the two's complement bits is the point of an unsigned shift"
)]
fn unsigned_shift_right(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    let builtin = &MATH[28];
    builtin.check_arity(args, 2, 2)?;
    let value = number_arg(builtin, &args[0])?;
    let count = number_arg(builtin, &args[1])?;
    let bits = value.to_bigint().and_then(|b| b.to_i64());
    let (Some(bits), Some(count)) = (bits, count.to_bigint()) else {
        return Err(unsupported_operand(builtin.name, args[0].type_name()));
    };
    let count = (count & BigInt::from(63)).to_u32().unwrap_or(0);
    let shifted = if value.width() <= Width::Int {
        u64::from((bits as i32 as u32) >> (count & 31))
    } else {
        (bits as u64) >> count
    };
    Ok(Value::number(Number::from_big(BigInt::from(shifted))))
}

fn pre_increment(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    unary(29, UnaryOp::PreIncrement, args)
}

fn post_increment(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    unary(30, UnaryOp::PostIncrement, args)
}

fn pre_decrement(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    unary(31, UnaryOp::PreDecrement, args)
}

fn post_decrement(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, BugError> {
    unary(32, UnaryOp::PostDecrement, args)
}
