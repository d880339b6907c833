// Parser module: turns raw tabular input into normalized sales.

pub mod csv_parser;

pub use csv_parser::{CsvSalesParser, Parser};
