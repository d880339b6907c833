use crate::model::{Anomaly, KeyValue};
use crate::utils::{fmt_day, join_kv};

/// Below this average order value, bundling is suggested.
pub const LOW_AOV_THRESHOLD: f64 = 50.0;

/// Numeric signals the rule set looks at.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub overdue_count: usize,
    pub overdue_total: f64,
    pub top_customers: &'a [KeyValue],
    pub top_products: &'a [KeyValue],
    pub anomalies: &'a [Anomaly],
}

/// Applies every rule in a fixed order; all matching messages are returned.
pub fn suggestions(signals: &Signals<'_>) -> Vec<String> {
    let mut out = Vec::new();

    if signals.overdue_count > 0 {
        out.push(format!(
            "Initiate dunning workflow: {} overdue/unpaid invoices totaling ${:.2}.",
            signals.overdue_count, signals.overdue_total
        ));
    }

    if signals.avg_order_value < LOW_AOV_THRESHOLD {
        out.push(
            "Test bundles/tiers to increase Average Order Value (cross-sell top products)."
                .to_string(),
        );
    }

    if !signals.top_customers.is_empty() {
        out.push(format!(
            "Send loyalty offers to top customers: {}.",
            join_kv(signals.top_customers)
        ));
    }

    if !signals.top_products.is_empty() {
        out.push(format!(
            "Double down on high-velocity products: {}.",
            join_kv(signals.top_products)
        ));
    }

    for anomaly in signals.anomalies {
        if anomaly.z < -2.0 {
            out.push(format!(
                "Investigate revenue dip on {} (z={:.2}). Check campaigns, outages, pricing.",
                fmt_day(anomaly.day),
                anomaly.z
            ));
        } else if anomaly.z > 2.0 {
            out.push(format!(
                "Spike on {} (z={:.2}). Attribute uplift and try to replicate.",
                fmt_day(anomaly.day),
                anomaly.z
            ));
        }
    }

    if signals.total_revenue > 0.0
        && signals.avg_order_value > 0.0
        && signals.overdue_count == 0
        && signals.anomalies.is_empty()
    {
        out.push(
            "Steady performance. Consider experimentation (price tests, reorder nudges) to uncover upside."
                .to_string(),
        );
    }

    out
}
