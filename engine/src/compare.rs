// Relational comparison between dynamic values
use crate::convert::{to_date, to_float32, to_float64, to_int, to_int32, to_int64};
use crate::error::ConvertError;
use shared::models::{CompareOp, Value};

fn strip_quotes(s: &str) -> String {
    s.replace('\'', "")
}

/// `a > b`. `b` is coerced to `a`'s numeric width before comparing; strings
/// and dates only compare against their own tag.
///
/// If either operand is `Null` the result is `Ok(true)`. Callers must not
/// treat this as a null ordering.
pub fn gt_any(a: &Value, b: &Value) -> Result<bool, ConvertError> {
    if a.is_null() || b.is_null() {
        return Ok(true);
    }

    match a {
        Value::Str(x) => match b {
            Value::Str(y) => Ok(strip_quotes(x) > strip_quotes(y)),
            _ => Err(ConvertError::Unsupported { from: b.kind(), to: a.kind() }),
        },
        Value::Int32(x) => Ok(*x > to_int32(b)?),
        Value::Int64(x) => Ok(*x > to_int64(b)?),
        Value::Int(x) => Ok(*x > to_int(b)?),
        Value::Float32(x) => Ok(*x > to_float32(b)?),
        Value::Float64(x) => Ok(*x > to_float64(b)?),
        Value::Date(x) => match b {
            Value::Date(y) => Ok(x > y),
            _ => Err(ConvertError::Unsupported { from: b.kind(), to: a.kind() }),
        },
        Value::Null => Err(ConvertError::UnsupportedComparison { left: a.kind(), right: b.kind() }),
    }
}

/// `a < b` for operands of the same tag. No coercion is attempted.
pub fn lt_any(a: &Value, b: &Value) -> Result<bool, ConvertError> {
    match (a, b) {
        (Value::Float64(x), Value::Float64(y)) => Ok(x < y),
        (Value::Float32(x), Value::Float32(y)) => Ok(x < y),
        (Value::Int64(x), Value::Int64(y)) => Ok(x < y),
        (Value::Int32(x), Value::Int32(y)) => Ok(x < y),
        (Value::Int(x), Value::Int(y)) => Ok(x < y),
        (Value::Str(x), Value::Str(y)) => Ok(x < y),
        (Value::Date(x), Value::Date(y)) => Ok(x < y),
        _ => Err(ConvertError::UnsupportedComparison { left: a.kind(), right: b.kind() }),
    }
}

// Date-like operands (text or integer digits) are compared as dates
fn as_date_if_possible(value: &Value) -> Value {
    match to_date(value) {
        Ok(d) => Value::Date(d),
        Err(_) => value.clone(),
    }
}

/// Evaluates `op` from the two strict orderings `a > b` and `b > a`.
pub fn compare_op(a: &Value, b: &Value, op: CompareOp) -> Result<bool, ConvertError> {
    let a = as_date_if_possible(a);
    let b = as_date_if_possible(b);

    let gt = gt_any(&a, &b)?;
    let lt = gt_any(&b, &a)?;

    Ok(match op {
        CompareOp::Gt => gt,
        CompareOp::Ge => !lt,
        CompareOp::Eq => !gt && !lt,
        CompareOp::Ne => gt || lt,
        CompareOp::Lt => lt,
        CompareOp::Le => !gt,
    })
}

/// Compares `a` and `b` with one of `==`, `!=`, `>`, `<`, `>=`, `<=`.
pub fn comparer(a: &Value, b: &Value, op: &str) -> Result<bool, ConvertError> {
    let op: CompareOp = op.parse()?;
    compare_op(a, b, op)
}
