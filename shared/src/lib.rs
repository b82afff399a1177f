pub mod models;
pub mod utils;

pub use models::{CompareOp, Kind, ParseCompareOpError, Table, Value};
