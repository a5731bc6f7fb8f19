//! Input boundary: delimited monthly-table reading.
mod csv_table;

pub use csv_table::{parse_table, read_table, read_table_with_config, TableReaderConfig};
