// Row filtering on a single column
use shared::models::{CompareOp, Value};

use super::result_reader::{ResultSet, Row};
use crate::compare::compare_op;
use crate::convert::to_kind;
use crate::error::{ConvertError, EngineError};

/// Keeps the rows whose cell in `column` satisfies `cell <op> literal`.
/// The literal is coerced to each cell's type before comparing.
pub fn filter_rows(rows: &[Row], column: usize, op: &str, literal: &Value) -> Result<Vec<Row>, EngineError> {
    let op: CompareOp = op.parse().map_err(ConvertError::from)?;
    let mut kept = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let cell = row.get(column).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Row {} has no column {}", idx, column))
        })?;

        let keep = if cell.is_null() {
            compare_op(cell, literal, op)
        } else {
            to_kind(literal, cell.kind()).and_then(|lit| compare_op(cell, &lit, op))
        }
        .map_err(|source| EngineError::FilterError { row: idx, source })?;

        if keep {
            kept.push(row.clone());
        }
    }
    Ok(kept)
}

impl ResultSet {
    pub fn filter(&self, column: &str, op: &str, literal: &Value) -> Result<ResultSet, EngineError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| EngineError::ConfigError(format!("Unknown column '{}'", column)))?;

        Ok(ResultSet {
            columns: self.columns.clone(),
            kinds: self.kinds.clone(),
            rows: filter_rows(&self.rows, idx, op, literal)?,
        })
    }
}
