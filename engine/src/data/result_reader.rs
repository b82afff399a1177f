// Reads a delimited export of a query result into typed rows
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Kind, Table, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::config::settings::EngineSettings;
use crate::convert::to_kind;
use crate::error::EngineError;

pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub kinds: Vec<Kind>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    // Rows become numbered row names; cells are regrouped by column
    pub fn to_table(&self) -> Table {
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(self.rows.len()); self.columns.len()];
        for row in &self.rows {
            for (col, cell) in data.iter_mut().zip(row.iter()) {
                col.push(cell.clone());
            }
        }

        Table {
            row_names: (1..=self.rows.len()).map(|n| n.to_string()).collect(),
            col_names: self.columns.clone(),
            data,
        }
    }
}

pub struct ResultReader {
    settings: EngineSettings,
}

impl ResultReader {
    pub fn new(settings: EngineSettings) -> Self {
        ResultReader { settings }
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<ResultSet, EngineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            EngineError::CsvDataFormatError(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        let set = self.read(BufReader::new(file))?;
        info!(path = %path.display(), rows = set.rows.len(), columns = set.columns.len(), "Loaded result file");
        Ok(set)
    }

    pub fn read<R: Read>(&self, source: R) -> Result<ResultSet, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.settings.delimiter_byte()?)
            .has_headers(self.settings.has_headers)
            .from_reader(source);

        let mut columns: Vec<String> = if self.settings.has_headers {
            rdr.headers()?.iter().map(|h| h.trim().to_string()).collect()
        } else {
            Vec::new()
        };
        let mut kinds: Vec<Kind> = columns.iter().map(|c| self.settings.kind_of(c)).collect();

        let mut rows = Vec::new();
        let first_line = if self.settings.has_headers { 2 } else { 1 };

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + first_line;
            let record = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error reading record at line {}: {}", line, e))
            })?;

            // Headerless input: columns are named by position from the first record
            if columns.is_empty() {
                columns = (1..=record.len()).map(|n| format!("col{}", n)).collect();
                kinds = columns.iter().map(|c| self.settings.kind_of(c)).collect();
            }

            rows.push(Self::convert_record(&record, &columns, &kinds, line)?);
        }

        debug!(rows = rows.len(), "Converted result rows");
        Ok(ResultSet { columns, kinds, rows })
    }

    fn convert_record(record: &StringRecord, columns: &[String], kinds: &[Kind], line: usize) -> Result<Row, EngineError> {
        if record.len() != columns.len() {
            return Err(EngineError::CsvDataFormatError(format!(
                "Expected {} fields at line {}, found {}",
                columns.len(),
                line,
                record.len()
            )));
        }

        record
            .iter()
            .zip(columns.iter().zip(kinds.iter()))
            .map(|(field, (name, kind))| {
                let field = field.trim();
                if field.is_empty() {
                    return Ok(Value::Null);
                }
                to_kind(&Value::from(field), *kind).map_err(|e| {
                    EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e))
                })
            })
            .collect()
    }
}
