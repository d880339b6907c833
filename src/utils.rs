// Utility functions
use crate::model::KeyValue;
use chrono::{DateTime, NaiveDate};

/// Each layout is paired with its digit shape (`9` = one ASCII digit). Input
/// must match the shape exactly, so years are always four digits and day and
/// month always two. Day-first and month-first slash layouts are both
/// accepted; the earlier entry wins, so "01/02/2006" reads as 1 February.
const DATE_FORMATS: [(&str, &str); 5] = [
    ("%Y-%m-%d", "9999-99-99"),
    ("%d/%m/%Y", "99/99/9999"),
    ("%m/%d/%Y", "99/99/9999"),
    ("%Y/%m/%d", "9999/99/99"),
    ("%Y.%m.%d", "9999.99.99"),
];
const YEAR_MONTH_SHAPE: &str = "9999-99";

fn matches_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'9' => c.is_ascii_digit(),
            literal => c == literal,
        })
}

/// Parses a date with the ordered format list, then RFC 3339, then `YYYY-MM`.
pub fn parse_date_flexible(date_str: &str) -> Option<NaiveDate> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }

    for (fmt, shape) in DATE_FORMATS {
        if !matches_shape(s, shape) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Year-month only: first day of the month.
    if !matches_shape(s, YEAR_MONTH_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

/// Formats a date the way every report surface prints it.
pub fn fmt_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "Acme ($487.00), Zen ($398.00)"
pub fn join_kv(items: &[KeyValue]) -> String {
    items
        .iter()
        .map(|kv| format!("{} (${:.2})", kv.key, kv.value))
        .collect::<Vec<_>>()
        .join(", ")
}
