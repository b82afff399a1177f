// Query-result data: reading, filtering and display
pub mod filter;
pub mod result_reader;
pub mod table;

pub use filter::filter_rows;
pub use result_reader::{ResultReader, ResultSet, Row};
pub use table::{render_table, write_table};
