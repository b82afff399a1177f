use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A runtime value whose concrete type is only known once inspected,
/// typically a cell read from a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Int(isize),
    Float32(f32),
    Float64(f64),
    Str(String),
    Date(DateTime<Utc>),
    Null,
}

impl Value {
    // Active tag of the value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Int(_) => Kind::Int,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::Str(_) => Kind::String,
            Value::Date(_) => Kind::Date,
            Value::Null => Kind::Unsupported,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(x) => write!(f, "{}", x),
            Value::Int64(x) => write!(f, "{}", x),
            Value::Int(x) => write!(f, "{}", x),
            Value::Float32(x) => write!(f, "{}", x),
            Value::Float64(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S UTC")),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int32(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int64(x)
    }
}

impl From<isize> for Value {
    fn from(x: isize) -> Self {
        Value::Int(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float32(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float64(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

/// Selector over the value tags, used to request a specific coercion.
/// Settings files name kinds textually ("float64", "time.Time", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Float64,
    Float32,
    String,
    Int,
    Int32,
    Int64,
    Date,
    Unsupported,
}

impl Kind {
    // Unknown names defer the failure to the point of use
    pub fn from_type_name(name: &str) -> Kind {
        match name {
            "float64" => Kind::Float64,
            "float32" => Kind::Float32,
            "string" => Kind::String,
            "int" => Kind::Int,
            "int32" => Kind::Int32,
            "int64" => Kind::Int64,
            "time.Time" => Kind::Date,
            _ => Kind::Unsupported,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Float64 => "float64",
            Kind::Float32 => "float32",
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Date => "time.Time",
            Kind::Unsupported => "unsupported",
        }
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        Kind::from_type_name(name)
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::from_type_name(&name)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.type_name().to_string()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported comparison: {0}")]
pub struct ParseCompareOpError(pub String);

impl FromStr for CompareOp {
    type Err = ParseCompareOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            ">" => Ok(CompareOp::Gt),
            "<" => Ok(CompareOp::Lt),
            ">=" => Ok(CompareOp::Ge),
            "<=" => Ok(CompareOp::Le),
            other => Err(ParseCompareOpError(other.to_string())),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        };
        f.write_str(token)
    }
}

// Query result laid out for display. Cells are stored by columns:
// data[col][row].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

static NULL_CELL: Value = Value::Null;

impl Table {
    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `row` of column `col`. Short columns read as `Null` past
    /// their end.
    pub fn cell(&self, col: usize, row: usize) -> &Value {
        self.data.get(col).and_then(|c| c.get(row)).unwrap_or(&NULL_CELL)
    }

    /// Removes rows with no content. A row has content if any cell is a
    /// number, a date, or a non-empty string.
    pub fn clean_up(&mut self) {
        let row_count = self.row_count();
        let mut row_names = Vec::new();
        let mut data: Vec<Vec<Value>> = vec![Vec::new(); self.data.len()];

        for row in 0..row_count {
            let has_content = (0..self.data.len()).any(|col| match self.cell(col, row) {
                Value::Str(s) => !s.is_empty(),
                Value::Null => false,
                _ => true,
            });
            if !has_content {
                continue;
            }

            if let Some(name) = self.row_names.get(row) {
                row_names.push(name.clone());
            }
            for (col, out_col) in data.iter_mut().enumerate() {
                out_col.push(self.cell(col, row).clone());
            }
        }

        self.row_names = row_names;
        self.data = data;
    }
}
