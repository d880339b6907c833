use crate::model::{KeyValue, SalesReport};
use crate::utils::fmt_day;
use chrono::NaiveDate;
use std::fmt::Write;

fn period_bound(date: Option<NaiveDate>) -> String {
    date.map(fmt_day).unwrap_or_else(|| "n/a".to_string())
}

fn write_kv_section(out: &mut String, title: &str, items: &[KeyValue]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "## {title}");
    for kv in items {
        let _ = writeln!(out, "- {}: ${:.2}", kv.key, kv.value);
    }
    out.push('\n');
}

/// Renders the report as markdown. Sections always appear in the same order;
/// empty ones are left out.
pub fn render_markdown(report: &SalesReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "# BizPulse Report ({} → {})\n",
        period_bound(report.from),
        period_bound(report.to)
    );
    let _ = writeln!(
        out,
        "- **Revenue:** ${:.2}\n- **Orders:** {}\n- **AOV:** ${:.2}\n- **Unique Customers:** {}\n- **Retention:** {:.1}%\n- **Forecast (7d):** ${:.2}\n",
        report.total_revenue,
        report.orders,
        report.avg_order_value,
        report.unique_customers,
        report.retention_rate * 100.0,
        report.forecast_next_7_days_total
    );

    write_kv_section(&mut out, "Top Customers", &report.top_customers);
    write_kv_section(&mut out, "Top Products", &report.top_products);

    if !report.anomalies.is_empty() {
        out.push_str("## Anomalies\n");
        for a in &report.anomalies {
            let _ = writeln!(out, "- {}: ${:.2} (z={:.2})", fmt_day(a.day), a.value, a.z);
        }
        out.push('\n');
    }

    if report.overdue_count > 0 {
        let _ = writeln!(
            out,
            "## Overdue / Unpaid\n- Count: {}\n- Total: ${:.2}\n",
            report.overdue_count, report.overdue_total
        );
    }

    if !report.suggestions.is_empty() {
        out.push_str("## Recommendations\n");
        for s in &report.suggestions {
            let _ = writeln!(out, "- {s}");
        }
        out.push('\n');
    }

    if let Some(summary) = report.exec_summary.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "## Executive Summary (AI)\n{summary}");
    }

    out
}
