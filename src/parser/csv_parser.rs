// CSV ingestion: header + data rows -> Vec<Sale>
use crate::model::{IngestError, Sale};
use crate::normalizer::{normalize_all, ColumnMap};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use tracing::info;

pub trait Parser {
    fn parse<R: Read>(&self, input: R) -> Result<Vec<Sale>, IngestError>;
}

/// Comma-delimited parser with standard quoting. Every row must have the
/// same number of fields as the header, otherwise the input is rejected.
/// Whitespace before a field is ignored, including before an opening quote.
#[derive(Debug, Clone, Copy)]
pub struct CsvSalesParser;

impl CsvSalesParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, input: &str) -> Result<Vec<Sale>, IngestError> {
        self.parse(input.as_bytes())
    }
}

impl Default for CsvSalesParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for CsvSalesParser {
    fn parse<R: Read>(&self, mut input: R) -> Result<Vec<Sale>, IngestError> {
        let mut raw = String::new();
        input.read_to_string(&mut raw)?;
        let text = trim_leading_field_space(&raw);

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let records = rdr.records().collect::<Result<Vec<StringRecord>, _>>()?;
        let Some((header, rows)) = records.split_first() else {
            return Err(IngestError::NoDataRows);
        };
        if rows.is_empty() {
            return Err(IngestError::NoDataRows);
        }

        let columns = ColumnMap::from_header(header);
        let sales = normalize_all(rows, &columns);
        info!(
            "Parsed {} rows, kept {}, dropped {}",
            rows.len(),
            sales.len(),
            rows.len() - sales.len()
        );
        Ok(sales)
    }
}

/// Drops spaces and tabs at the start of every unquoted field so that
/// `a, "b, c"` reads as two fields. Quoted content is left untouched.
pub fn trim_leading_field_space(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut just_closed = false;

    for c in text.chars() {
        if !in_quotes && at_field_start && (c == ' ' || c == '\t') {
            continue;
        }
        let starts_field = at_field_start;
        at_field_start = false;

        match c {
            '"' if in_quotes => {
                in_quotes = false;
                just_closed = true;
                out.push(c);
                continue;
            }
            // Opening quote, or the second half of an escaped `""`.
            '"' if starts_field || just_closed => in_quotes = true,
            ',' | '\n' if !in_quotes => at_field_start = true,
            _ => {}
        }
        just_closed = false;
        out.push(c);
    }
    out
}
