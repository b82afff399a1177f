use shared::models::{Kind, ParseCompareOpError};
use thiserror::Error;

// Failures of the conversion/comparison core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: Kind, to: Kind },

    #[error("{from} out of range for {to}")]
    OutOfRange { from: Kind, to: Kind },

    #[error("cannot convert '{input}' to {to}")]
    Parse { input: String, to: Kind },

    #[error("unsupported comparison: {0}")]
    UnsupportedOperator(String),

    #[error("unsupported comparison between {left} and {right}")]
    UnsupportedComparison { left: Kind, right: Kind },

    #[error("unsupported target type")]
    UnsupportedKind,

    #[error("input is nil")]
    NilInput,
}

impl From<ParseCompareOpError> for ConvertError {
    fn from(err: ParseCompareOpError) -> Self {
        ConvertError::UnsupportedOperator(err.0)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Settings format error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConvertError),

    #[error("Filter error at row {row}: {source}")]
    FilterError { row: usize, source: ConvertError },
}
