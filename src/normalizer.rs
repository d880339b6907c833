use crate::model::Sale;
use crate::utils::parse_date_flexible;
use csv::StringRecord;
use tracing::debug;

const UNKNOWN: &str = "Unknown";

/// Column positions of the logical fields, resolved once per header row.
///
/// A field matches any header whose trimmed, lower-cased name *contains* the
/// field token ("Invoice Date" matches `date`). When several headers match,
/// the leftmost one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub customer: Option<usize>,
    pub product: Option<usize>,
    pub amount: Option<usize>,
    pub status: Option<usize>,
}

impl ColumnMap {
    pub fn from_header(header: &StringRecord) -> Self {
        let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |token: &str| names.iter().position(|name| name.contains(token));

        Self {
            date: find("date"),
            customer: find("customer"),
            product: find("product"),
            amount: find("amount"),
            status: find("status"),
        }
    }
}

/// Normalizes all data rows, dropping the ones without a usable date.
pub fn normalize_all(rows: &[StringRecord], columns: &ColumnMap) -> Vec<Sale> {
    rows.iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let sale = normalize_row(row, columns);
            if sale.is_none() {
                debug!("Dropping row {}: missing or unparsable date", idx + 2);
            }
            sale
        })
        .collect()
}

/// Coerces one raw row into a `Sale`. Returns `None` only when the date is
/// missing or unparsable; every other field falls back to a default.
pub fn normalize_row(row: &StringRecord, columns: &ColumnMap) -> Option<Sale> {
    let date = parse_date_flexible(field(row, columns.date))?;

    Some(Sale {
        date,
        customer: or_unknown(field(row, columns.customer)),
        product: or_unknown(field(row, columns.product)),
        amount: parse_amount(field(row, columns.amount)),
        status: field(row, columns.status).to_lowercase(),
    })
}

/// Strips thousands separators; anything unparsable counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', "").parse::<f64>().unwrap_or(0.0)
}

fn field(row: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(str::trim).unwrap_or("")
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
