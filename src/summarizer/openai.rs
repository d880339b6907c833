use crate::model::{SalesReport, SummaryError};
use crate::summarizer::SummaryGenerator;
use crate::utils::{fmt_day, join_kv};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const SYSTEM_PROMPT: &str = "You write concise executive summaries for business performance.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Chat-completions client. Timeouts are enforced by the caller.
pub struct OpenAiSummarizer {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl OpenAiSummarizer {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

/// The user prompt: period, headline KPIs, top lists, overdue and forecast.
pub fn build_prompt(report: &SalesReport) -> String {
    let bound = |d: Option<chrono::NaiveDate>| d.map(fmt_day).unwrap_or_default();
    format!(
        "Summarize these KPIs in 4 sentences, include 1-2 risks and 1-2 actionable next steps.\n\
         From:{} To:{}\n\
         Revenue: {:.2}\n\
         Orders: {}\n\
         AOV: {:.2}\n\
         Retention: {:.2}\n\
         TopCustomers: {}\n\
         TopProducts: {}\n\
         Overdue: {} (${:.2})\n\
         Forecast7: {:.2}",
        bound(report.from),
        bound(report.to),
        report.total_revenue,
        report.orders,
        report.avg_order_value,
        report.retention_rate,
        join_kv(&report.top_customers),
        join_kv(&report.top_products),
        report.overdue_count,
        report.overdue_total,
        report.forecast_next_7_days_total
    )
}

#[async_trait]
impl SummaryGenerator for OpenAiSummarizer {
    async fn summarize(&self, report: &SalesReport) -> Result<String, SummaryError> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(report) }
            ],
            "temperature": 0.2
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SummaryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ Summary API responded [{}]", status);
            return Err(SummaryError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::Http(e.to_string()))?;
        debug!("Summary API returned {} choices", parsed.choices.len());

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(SummaryError::EmptyResponse)
    }
}
