mod csv_row;

pub use csv_row::{CsvField, CsvRow};
