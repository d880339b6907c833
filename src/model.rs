// Core structs: Sale, SalesReport and the error types shared across modules
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// One normalized invoice/sales row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub date: NaiveDate,
    pub customer: String,
    pub product: String,
    pub amount: f64,
    /// Lower-cased free text ("paid", "unpaid", "overdue", ...).
    pub status: String,
}

/// A named revenue total (top customers / top products).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: f64,
}

/// Revenue of a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub day: NaiveDate,
    pub value: f64,
    pub z: f64,
}

/// The fully computed metrics of one ingestion run. Built once, never mutated
/// afterwards except for the optional narrative summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub orders: usize,
    pub unique_customers: usize,
    pub top_customers: Vec<KeyValue>,
    pub top_products: Vec<KeyValue>,
    pub daily_revenue: Vec<DailyPoint>,
    pub retention_rate: f64,
    #[serde(rename = "forecastNext7DaysTotal")]
    pub forecast_next_7_days_total: f64,
    pub anomalies: Vec<Anomaly>,
    pub overdue_count: usize,
    pub overdue_total: f64,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_summary: Option<String>,
}

impl SalesReport {
    /// True when the run should raise an alert (anomalies or overdue invoices).
    pub fn needs_alert(&self) -> bool {
        !self.anomalies.is_empty() || self.overdue_count > 0
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("csv read: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv has no data rows")]
    NoDataRows,
    #[error("ingestion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("alert API error: {0}")]
    ApiError(String),
    #[error("alert endpoint unreachable")]
    Unreachable,
    #[error("alert request timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary request failed: {0}")]
    Http(String),
    #[error("summary API responded with status {0}")]
    Status(u16),
    #[error("summary response had no content")]
    EmptyResponse,
    #[error("summary request timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Json(#[from] serde_json::Error),
}
