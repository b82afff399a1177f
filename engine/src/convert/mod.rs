// Coercion of dynamic values into concrete types
//
// Every numeric coercion accepts the integer widths, the float widths and
// text. Narrowing into an integer is range checked first and fails with
// `ConvertError::OutOfRange` instead of truncating.
pub mod date;

pub use date::to_date;

use crate::error::ConvertError;
use shared::models::{Kind, Value};

fn parse_text<T: std::str::FromStr>(text: &str, to: Kind) -> Result<T, ConvertError> {
    text.parse::<T>().map_err(|_| ConvertError::Parse {
        input: text.to_string(),
        to,
    })
}

// Checks x against [min, -min), the range of a two's complement integer whose
// minimum is `min`. NaN is never in range.
fn check_float_range(x: f64, min: f64, from: Kind, to: Kind) -> Result<f64, ConvertError> {
    if x >= min && x < -min {
        Ok(x)
    } else {
        Err(ConvertError::OutOfRange { from, to })
    }
}

fn narrow<S, T: TryFrom<S>>(x: S, from: Kind, to: Kind) -> Result<T, ConvertError> {
    T::try_from(x).map_err(|_| ConvertError::OutOfRange { from, to })
}

pub fn to_int(value: &Value) -> Result<isize, ConvertError> {
    let to = Kind::Int;
    let from = value.kind();
    match value {
        Value::Int(x) => Ok(*x),
        Value::Int32(x) => narrow(*x, from, to),
        Value::Int64(x) => narrow(*x, from, to),
        Value::Float32(x) => Ok(check_float_range(f64::from(*x), isize::MIN as f64, from, to)? as isize),
        Value::Float64(x) => Ok(check_float_range(*x, isize::MIN as f64, from, to)? as isize),
        Value::Str(s) => parse_text(s, to),
        Value::Date(_) | Value::Null => Err(ConvertError::Unsupported { from, to }),
    }
}

pub fn to_int32(value: &Value) -> Result<i32, ConvertError> {
    let to = Kind::Int32;
    let from = value.kind();
    match value {
        Value::Int32(x) => Ok(*x),
        Value::Int64(x) => narrow(*x, from, to),
        Value::Int(x) => narrow(*x, from, to),
        Value::Float32(x) => Ok(check_float_range(f64::from(*x), f64::from(i32::MIN), from, to)? as i32),
        Value::Float64(x) => Ok(check_float_range(*x, f64::from(i32::MIN), from, to)? as i32),
        Value::Str(s) => parse_text(s, to),
        Value::Date(_) | Value::Null => Err(ConvertError::Unsupported { from, to }),
    }
}

pub fn to_int64(value: &Value) -> Result<i64, ConvertError> {
    let to = Kind::Int64;
    let from = value.kind();
    match value {
        Value::Int64(x) => Ok(*x),
        Value::Int32(x) => Ok(i64::from(*x)),
        Value::Int(x) => narrow(*x, from, to),
        Value::Float32(x) => Ok(check_float_range(f64::from(*x), i64::MIN as f64, from, to)? as i64),
        Value::Float64(x) => Ok(check_float_range(*x, i64::MIN as f64, from, to)? as i64),
        Value::Str(s) => parse_text(s, to),
        Value::Date(_) | Value::Null => Err(ConvertError::Unsupported { from, to }),
    }
}

pub fn to_float32(value: &Value) -> Result<f32, ConvertError> {
    let to = Kind::Float32;
    match value {
        Value::Float32(x) => Ok(*x),
        Value::Float64(x) => Ok(*x as f32),
        Value::Int32(x) => Ok(*x as f32),
        Value::Int64(x) => Ok(*x as f32),
        Value::Int(x) => Ok(*x as f32),
        Value::Str(s) => parse_text(s, to),
        Value::Date(_) | Value::Null => Err(ConvertError::Unsupported { from: value.kind(), to }),
    }
}

pub fn to_float64(value: &Value) -> Result<f64, ConvertError> {
    let to = Kind::Float64;
    match value {
        Value::Float64(x) => Ok(*x),
        Value::Float32(x) => Ok(f64::from(*x)),
        Value::Int32(x) => Ok(f64::from(*x)),
        Value::Int64(x) => Ok(*x as f64),
        Value::Int(x) => Ok(*x as f64),
        Value::Str(s) => parse_text(s, to),
        Value::Date(_) | Value::Null => Err(ConvertError::Unsupported { from: value.kind(), to }),
    }
}

/// Text form of a value. Dates render as `M/D/YYYY`, floats with two
/// decimals, strings unchanged; anything else uses `Value`'s `Display`.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Date(d) => d.format("%-m/%-d/%Y").to_string(),
        Value::Float32(x) => format!("{:.2}", x),
        Value::Float64(x) => format!("{:.2}", x),
        other => other.to_string(),
    }
}

pub fn to_float64_slice(values: &[Value]) -> Result<Vec<f64>, ConvertError> {
    values.iter().map(to_float64).collect()
}

/// Coerces `value` to the type selected by `kind`.
pub fn to_kind(value: &Value, kind: Kind) -> Result<Value, ConvertError> {
    if value.is_null() {
        return Err(ConvertError::NilInput);
    }

    match kind {
        Kind::Float64 => to_float64(value).map(Value::Float64),
        Kind::Float32 => to_float32(value).map(Value::Float32),
        Kind::Int64 => to_int64(value).map(Value::Int64),
        Kind::Int32 => to_int32(value).map(Value::Int32),
        Kind::Int => to_int(value).map(Value::Int),
        Kind::String => Ok(Value::Str(to_string(value))),
        Kind::Date => to_date(value).map(Value::Date),
        Kind::Unsupported => Err(ConvertError::UnsupportedKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_to_int32_accepts_every_numeric_tag() {
        assert_eq!(to_int32(&Value::Int32(7)).unwrap(), 7);
        assert_eq!(to_int32(&Value::Int64(-7)).unwrap(), -7);
        assert_eq!(to_int32(&Value::Int(12)).unwrap(), 12);
        assert_eq!(to_int32(&Value::Float32(3.9)).unwrap(), 3);
        assert_eq!(to_int32(&Value::Float64(-3.9)).unwrap(), -3);
        assert_eq!(to_int32(&Value::from("123")).unwrap(), 123);
    }

    #[test]
    fn test_to_int32_out_of_range() {
        let overflow = ConvertError::OutOfRange { from: Kind::Int64, to: Kind::Int32 };
        assert_eq!(to_int32(&Value::Int64(i64::MAX)).unwrap_err(), overflow);

        let err = to_int32(&Value::Float32(i64::MAX as f32)).unwrap_err();
        assert_eq!(err, ConvertError::OutOfRange { from: Kind::Float32, to: Kind::Int32 });

        let err = to_int32(&Value::Float64(i64::MAX as f64)).unwrap_err();
        assert_eq!(err, ConvertError::OutOfRange { from: Kind::Float64, to: Kind::Int32 });

        assert!(to_int32(&Value::Int(isize::MAX)).is_err());
        assert!(to_int32(&Value::Float64(f64::NAN)).is_err());
        assert!(to_int32(&Value::Float64(2147483648.0)).is_err());
    }

    #[test]
    fn test_to_int32_range_boundaries() {
        assert_eq!(to_int32(&Value::Float64(2147483647.0)).unwrap(), i32::MAX);
        assert_eq!(to_int32(&Value::Float64(-2147483648.0)).unwrap(), i32::MIN);
        assert_eq!(to_int32(&Value::Int64(i64::from(i32::MIN))).unwrap(), i32::MIN);
    }

    #[test]
    fn test_to_int32_parse_failures() {
        let err = to_int32(&Value::from("twelve")).unwrap_err();
        assert_eq!(err, ConvertError::Parse { input: "twelve".to_string(), to: Kind::Int32 });
        // Text beyond the target width is a parse failure, not an overflow
        assert!(matches!(to_int32(&Value::from("9999999999")), Err(ConvertError::Parse { .. })));
    }

    #[test]
    fn test_integer_coercions_reject_dates_and_null() {
        let date = Value::Date(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            to_int64(&date).unwrap_err(),
            ConvertError::Unsupported { from: Kind::Date, to: Kind::Int64 }
        );
        assert!(to_int(&Value::Null).is_err());
        assert!(to_float32(&date).is_err());
        assert!(to_float64(&Value::Null).is_err());
    }

    #[test]
    fn test_to_int64() {
        assert_eq!(to_int64(&Value::Int32(-5)).unwrap(), -5);
        assert_eq!(to_int64(&Value::from("9223372036854775807")).unwrap(), i64::MAX);
        assert!(to_int64(&Value::Float64(1e19)).is_err());
        assert!(to_int64(&Value::Float32(f32::INFINITY)).is_err());
        assert_eq!(to_int64(&Value::Float64(-9.223372036854775808e18)).unwrap(), i64::MIN);
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&Value::Int64(42)).unwrap(), 42);
        assert_eq!(to_int(&Value::from("-17")).unwrap(), -17);
        assert!(to_int(&Value::Float64(f64::MAX)).is_err());
    }

    #[test]
    fn test_float_coercions() {
        assert_eq!(to_float64(&Value::Int64(3)).unwrap(), 3.0);
        assert_eq!(to_float64(&Value::Float32(1.5)).unwrap(), 1.5);
        assert_eq!(to_float64(&Value::from("2.25")).unwrap(), 2.25);
        assert_eq!(to_float32(&Value::Float64(0.5)).unwrap(), 0.5);
        assert_eq!(to_float32(&Value::Int(-4)).unwrap(), -4.0);
        assert!(matches!(to_float32(&Value::from("1,5")), Err(ConvertError::Parse { .. })));
    }

    #[test]
    fn test_to_string() {
        let date = Value::Date(Utc.with_ymd_and_hms(2001, 10, 3, 0, 0, 0).unwrap());
        assert_eq!(to_string(&date), "10/3/2001");
        assert_eq!(to_string(&Value::Float64(3.14159)), "3.14");
        assert_eq!(to_string(&Value::Float32(2.0)), "2.00");
        assert_eq!(to_string(&Value::from("'quoted'")), "'quoted'");
        assert_eq!(to_string(&Value::Int64(-9)), "-9");
        assert_eq!(to_string(&Value::Null), "null");
    }

    #[test]
    fn test_int32_text_round_trip() {
        for x in [0, 1, -1, i32::MAX, i32::MIN, 20010203] {
            let text = Value::Str(to_string(&Value::Int32(x)));
            assert_eq!(to_int32(&text).unwrap(), x);
        }
    }

    #[test]
    fn test_to_float64_slice() {
        let values = vec![Value::Int32(1), Value::from("2.5"), Value::Float32(0.5)];
        assert_eq!(to_float64_slice(&values).unwrap(), vec![1.0, 2.5, 0.5]);

        let bad = vec![Value::Int32(1), Value::from("x")];
        assert!(to_float64_slice(&bad).is_err());
    }

    #[test]
    fn test_to_kind_dispatch() {
        assert_eq!(to_kind(&Value::from("12"), Kind::Int32).unwrap(), Value::Int32(12));
        assert_eq!(to_kind(&Value::Int32(12), Kind::Float64).unwrap(), Value::Float64(12.0));
        assert_eq!(to_kind(&Value::Float64(1.0), Kind::String).unwrap(), Value::from("1.00"));
        assert_eq!(to_kind(&Value::Int64(5), Kind::Int).unwrap(), Value::Int(5));
        assert_eq!(
            to_kind(&Value::from("October 3, 2001"), Kind::Date).unwrap(),
            Value::Date(Utc.with_ymd_and_hms(2001, 10, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_to_kind_failures() {
        assert_eq!(to_kind(&Value::Null, Kind::String).unwrap_err(), ConvertError::NilInput);
        assert_eq!(to_kind(&Value::Int32(1), Kind::Unsupported).unwrap_err(), ConvertError::UnsupportedKind);
        assert_eq!(
            to_kind(&Value::Int64(i64::MAX), Kind::Int32).unwrap_err(),
            ConvertError::OutOfRange { from: Kind::Int64, to: Kind::Int32 }
        );
        assert_eq!(to_kind(&Value::Int32(1), Kind::from("uint8")).unwrap_err(), ConvertError::UnsupportedKind);
    }
}
