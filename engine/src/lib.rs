// Conversion and comparison of dynamic values read from query results.
//
// `convert` and `compare` are pure and never log; `config` and `data` sit
// around them and handle files and logging.

pub mod compare;
pub mod config;
pub mod convert;
pub mod data;
pub mod error;
pub mod format;
pub mod query;

pub use compare::{comparer, gt_any, lt_any};
pub use convert::{to_date, to_float32, to_float64, to_int, to_int32, to_int64, to_kind, to_string};
pub use error::{ConvertError, EngineError};
