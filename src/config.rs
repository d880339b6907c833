use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Slack incoming-webhook URL; alerts are skipped when absent.
    pub slack_webhook: Option<String>,
    /// Narrative summaries are skipped when absent.
    pub openai_api_key: Option<String>,
    pub summary_model: String,
    pub summary_timeout_seconds: u64,
    pub top_n: usize,
    pub report_path: String,
    pub json_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack_webhook: None,
            openai_api_key: None,
            summary_model: "gpt-4o-mini".to_string(),
            summary_timeout_seconds: 8,
            top_n: 5,
            report_path: "report.md".to_string(),
            json_path: None,
        }
    }
}

impl AppConfig {
    /// Applies `SLACK_WEBHOOK` / `OPENAI_API_KEY` from the given lookup.
    /// Non-empty values win over the file; empty strings count as unset.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SLACK_WEBHOOK").filter(|v| !v.trim().is_empty()) {
            self.slack_webhook = Some(v);
        }
        if let Some(v) = lookup("OPENAI_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.openai_api_key = Some(v);
        }
        self.slack_webhook = self.slack_webhook.take().filter(|v| !v.trim().is_empty());
        self.openai_api_key = self.openai_api_key.take().filter(|v| !v.trim().is_empty());
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when it exists (defaults otherwise), then applies the
/// process environment.
pub fn load_config_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    let mut config = if Path::new(path).exists() {
        load_config(path)?
    } else {
        AppConfig::default()
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}
