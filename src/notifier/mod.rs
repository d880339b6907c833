// Notifier module: alert sinks that receive a single text message.

pub mod slack;

use crate::model::{NotifyError, SalesReport};
use crate::utils::fmt_day;
use async_trait::async_trait;

pub use slack::SlackNotifier;

/// Anything that can deliver a one-line alert.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, text: &str) -> Result<(), NotifyError>;
}

/// Builds the alert text for a report, or `None` when nothing warrants one.
pub fn alert_message(report: &SalesReport) -> Option<String> {
    if !report.needs_alert() {
        return None;
    }
    let bound = |d: Option<chrono::NaiveDate>| d.map(fmt_day).unwrap_or_default();
    Some(format!(
        "BizPulse Alert: {} anomalies; {} overdue (${:.2}). Period {}→{}. Rev ${:.2}.",
        report.anomalies.len(),
        report.overdue_count,
        report.overdue_total,
        bound(report.from),
        bound(report.to),
        report.total_revenue
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_message_without_risk() {
        assert!(alert_message(&SalesReport::default()).is_none());
    }

    #[test]
    fn message_cites_counts_and_period() {
        let report = SalesReport {
            from: NaiveDate::from_ymd_opt(2025, 7, 1),
            to: NaiveDate::from_ymd_opt(2025, 7, 5),
            total_revenue: 1234.0,
            overdue_count: 2,
            overdue_total: 398.0,
            ..SalesReport::default()
        };
        assert_eq!(
            alert_message(&report).unwrap(),
            "BizPulse Alert: 0 anomalies; 2 overdue ($398.00). Period 2025-07-01→2025-07-05. Rev $1234.00."
        );
    }
}
