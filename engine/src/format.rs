// Display and SQL-literal formatting of dynamic values
use shared::models::Value;

// Inserts ',' every three digits: -1234567 -> "-1,234,567"
fn group_thousands(x: i64) -> String {
    let digits = x.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if x < 0 {
        grouped.push('-');
    }

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Decimal places shrink as the magnitude grows
fn pretty_float(x: f64) -> String {
    let r = x.abs();
    if r < 0.1 {
        format!("{:.4}", x)
    } else if r < 1.0 {
        format!("{:.3}", x)
    } else if r < 10.0 {
        format!("{:.2}", x)
    } else {
        format!("{:.1}", x)
    }
}

/// Human-readable form used by table output.
pub fn pretty_string(value: &Value) -> String {
    match value {
        Value::Int32(x) => group_thousands(i64::from(*x)),
        Value::Int64(x) => group_thousands(*x),
        Value::Int(x) => group_thousands(*x as i64),
        Value::Float32(x) => pretty_float(f64::from(*x)),
        Value::Float64(x) => pretty_float(*x),
        Value::Str(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Null => String::new(),
    }
}

/// Constant suitable for splicing into a ClickHouse query.
pub fn to_sql_literal(value: &Value) -> String {
    match value {
        Value::Int32(_) | Value::Int64(_) | Value::Int(_) | Value::Float32(_) | Value::Float64(_) => {
            value.to_string()
        }
        Value::Str(s) => format!("'{}'", s),
        Value::Date(d) => format!("'{}'", d.format("%Y%m%d")),
        Value::Null => String::new(),
    }
}
