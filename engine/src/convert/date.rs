// Date coercion for values read from query results and SQL literals
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ConvertError;
use shared::models::{Kind, Value};

#[derive(Clone, Copy)]
enum Field {
    Digits(usize, usize),
    Letters(usize, usize),
    Lit(char),
}

use self::Field::{Digits, Letters, Lit};

// chrono skips blanks and takes short numeric fields, so each layout is
// matched on its exact shape before the calendar is checked.
const COMPACT: &[Field] = &[Digits(8, 8)];
const SLASHED: &[Field] = &[Digits(1, 2), Lit('/'), Digits(1, 2), Lit('/'), Digits(4, 4)];
const SLASHED_PADDED: &[Field] = &[Digits(2, 2), Lit('/'), Digits(2, 2), Lit('/'), Digits(4, 4)];
const SHORT_NAME_COMMA: &[Field] = &[Letters(3, 3), Lit(' '), Digits(1, 2), Lit(','), Lit(' '), Digits(4, 4)];
const LONG_NAME_COMMA: &[Field] = &[Letters(3, 9), Lit(' '), Digits(1, 2), Lit(','), Lit(' '), Digits(4, 4)];
const SHORT_NAME: &[Field] = &[Letters(3, 3), Lit(' '), Digits(1, 2), Lit(' '), Digits(4, 4)];
const LONG_NAME: &[Field] = &[Letters(3, 9), Lit(' '), Digits(1, 2), Lit(' '), Digits(4, 4)];

// Accepted layouts in priority order: compact numeric, M/D/YYYY, MM/DD/YYYY,
// "Mon D, YYYY", "Month D, YYYY", then both name forms without the comma.
const DATE_FORMATS: [(&str, &[Field]); 7] = [
    ("%Y%m%d", COMPACT),
    ("%-m/%-d/%Y", SLASHED),
    ("%m/%d/%Y", SLASHED_PADDED),
    ("%b %-d, %Y", SHORT_NAME_COMMA),
    ("%B %-d, %Y", LONG_NAME_COMMA),
    ("%b %-d %Y", SHORT_NAME),
    ("%B %-d %Y", LONG_NAME),
];

fn run_len(text: &str, min: usize, max: usize, class: fn(&u8) -> bool) -> Option<usize> {
    let len = text.bytes().take_while(class).count();
    (min..=max).contains(&len).then_some(len)
}

fn fits(text: &str, layout: &[Field]) -> bool {
    let mut rest = text;
    for field in layout {
        let taken = match *field {
            Digits(min, max) => run_len(rest, min, max, u8::is_ascii_digit),
            Letters(min, max) => run_len(rest, min, max, u8::is_ascii_alphabetic),
            Lit(c) => rest.starts_with(c).then_some(c.len_utf8()),
        };
        match taken {
            Some(len) => rest = &rest[len..],
            None => return false,
        }
    }
    rest.is_empty()
}

fn parse_date_text(text: &str) -> Result<DateTime<Utc>, ConvertError> {
    let cleaned = text.replace('\'', "");

    DATE_FORMATS
        .iter()
        .filter(|(_, layout)| fits(&cleaned, layout))
        .find_map(|(format, _)| NaiveDate::parse_from_str(&cleaned, format).ok())
        .map(|date| DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc))
        .ok_or_else(|| ConvertError::Parse {
            input: text.to_string(),
            to: Kind::Date,
        })
}

/// Coerces text, dates and integers (read as `YYYYMMDD`-style digits) into a
/// UTC date at midnight.
pub fn to_date(value: &Value) -> Result<DateTime<Utc>, ConvertError> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::Str(s) => parse_date_text(s),
        Value::Int32(x) => parse_date_text(&x.to_string()),
        Value::Int64(x) => parse_date_text(&x.to_string()),
        Value::Int(x) => parse_date_text(&x.to_string()),
        Value::Float32(_) | Value::Float64(_) | Value::Null => Err(ConvertError::Unsupported {
            from: value.kind(),
            to: Kind::Date,
        }),
    }
}
