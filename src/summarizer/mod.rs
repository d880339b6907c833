// Summarizer module: optional narrative text generated from a finished report.

pub mod openai;

use crate::model::{SalesReport, SummaryError};
use async_trait::async_trait;

pub use openai::OpenAiSummarizer;

/// Produces a short free-text summary of the report's scalar fields.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn summarize(&self, report: &SalesReport) -> Result<String, SummaryError>;
}
