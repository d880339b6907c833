// notifier/slack.rs

use crate::model::NotifyError;
use crate::notifier::AlertSink;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts alerts to a Slack incoming webhook as `{"text": ...}`.
pub struct SlackNotifier {
    webhook_url: String,
    client: Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl AlertSink for SlackNotifier {
    async fn send_alert(&self, text: &str) -> Result<(), NotifyError> {
        info!("📤 Sending Slack alert: {}", text);
        let payload = serde_json::json!({ "text": text });
        let response = match timeout(
            SEND_TIMEOUT,
            self.client.post(&self.webhook_url).json(&payload).send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!("❌ Slack send() failed: {:?}", e);
                return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
            }
            Err(_) => {
                warn!("⏳ Slack send() timed out");
                return Err(NotifyError::Timeout);
            }
        };
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "unknown".into());
        if !status.is_success() {
            warn!("❌ Slack webhook responded [{}]: {}", status, body);
            return Err(NotifyError::Unreachable);
        }
        info!("✅ Slack response [{}]: {}", status, body);
        Ok(())
    }
}
