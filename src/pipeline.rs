// Hosting-service layer around the pure analyzer: ingestion, optional
// narrative summary and optional alerting.
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::config::AppConfig;
use crate::model::{IngestError, Sale, SalesReport, SummaryError};
use crate::notifier::{alert_message, AlertSink, SlackNotifier};
use crate::parser::{CsvSalesParser, Parser};
use crate::summarizer::{OpenAiSummarizer, SummaryGenerator};
use std::io::Read;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tokio::time::timeout;
use tracing::{info, warn};

pub const DEFAULT_SUMMARY_TIMEOUT: Duration = Duration::from_secs(8);

pub struct Pipeline {
    parser: CsvSalesParser,
    analyzer: AnalyzerImpl,
    summarizer: Option<Box<dyn SummaryGenerator>>,
    alert_sink: Option<Box<dyn AlertSink>>,
    summary_timeout: Duration,
}

impl Pipeline {
    /// A pipeline without any external collaborators.
    pub fn new(analyzer: AnalyzerImpl) -> Self {
        Self {
            parser: CsvSalesParser::new(),
            analyzer,
            summarizer: None,
            alert_sink: None,
            summary_timeout: DEFAULT_SUMMARY_TIMEOUT,
        }
    }

    /// Wires the collaborators the configuration has credentials for.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut pipeline = Self::new(AnalyzerImpl::with_top_n(config.top_n))
            .with_summary_timeout(Duration::from_secs(config.summary_timeout_seconds));

        if let Some(key) = &config.openai_api_key {
            pipeline = pipeline.with_summarizer(Box::new(OpenAiSummarizer::new(
                key.clone(),
                config.summary_model.clone(),
            )));
        }
        if let Some(webhook) = &config.slack_webhook {
            pipeline = pipeline.with_alert_sink(Box::new(SlackNotifier::new(webhook.clone())));
        }
        pipeline
    }

    pub fn with_summarizer(mut self, summarizer: Box<dyn SummaryGenerator>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_alert_sink(mut self, sink: Box<dyn AlertSink>) -> Self {
        self.alert_sink = Some(sink);
        self
    }

    pub fn with_summary_timeout(mut self, summary_timeout: Duration) -> Self {
        self.summary_timeout = summary_timeout;
        self
    }

    /// Parses the input and runs the full pipeline. The only error is an
    /// ingestion failure; collaborator failures just leave their part out.
    /// Reading and parsing run on the blocking thread pool.
    pub async fn run<R>(&self, input: R) -> Result<SalesReport, IngestError>
    where
        R: Read + Send + 'static,
    {
        let parser = self.parser;
        let sales = spawn_blocking(move || parser.parse(input)).await??;
        Ok(self.run_sales(sales).await)
    }

    pub async fn run_sales(&self, sales: Vec<Sale>) -> SalesReport {
        let mut report = self.analyzer.build_report(sales);
        info!(
            "Report built: {} orders, revenue {:.2}, {} anomalies, {} overdue",
            report.orders,
            report.total_revenue,
            report.anomalies.len(),
            report.overdue_count
        );

        report.exec_summary = self.narrative(&report).await;
        self.alert(&report).await;
        report
    }

    async fn narrative(&self, report: &SalesReport) -> Option<String> {
        let summarizer = self.summarizer.as_ref()?;
        match timeout(self.summary_timeout, summarizer.summarize(report)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                warn!("Summary generator returned empty text");
                None
            }
            Ok(Err(e)) => {
                warn!("Summary generation failed: {}", e);
                None
            }
            Err(_) => {
                warn!("{} after {:?}", SummaryError::Timeout, self.summary_timeout);
                None
            }
        }
    }

    async fn alert(&self, report: &SalesReport) {
        let (Some(sink), Some(message)) = (&self.alert_sink, alert_message(report)) else {
            return;
        };
        if let Err(e) = sink.send_alert(&message).await {
            warn!("Alert delivery failed: {}", e);
        }
    }
}
