use crate::analyzer::aggregation::aggregate;
use crate::analyzer::anomaly::detect_anomalies;
use crate::analyzer::forecast::forecast_next_7_days;
use crate::analyzer::recommendations::{suggestions, Signals};
use crate::model::{Sale, SalesReport};

pub const DEFAULT_TOP_N: usize = 5;

/// Trait defining the interface for a sales analyzer.
pub trait Analyzer {
    /// Builds the complete report from one ingestion's sales. Pure: the same
    /// input always yields the same report.
    fn build_report(&self, sales: Vec<Sale>) -> SalesReport;
}

/// Implementation of the sales analyzer.
pub struct AnalyzerImpl {
    top_n: usize,
}

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self::with_top_n(DEFAULT_TOP_N)
    }

    pub fn with_top_n(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    /// Aggregation, anomaly detection, forecast and recommendations, in that
    /// order. No sales means an empty report without suggestions.
    fn build_report(&self, sales: Vec<Sale>) -> SalesReport {
        if sales.is_empty() {
            return SalesReport::default();
        }

        let agg = aggregate(sales, self.top_n);
        let anomalies = detect_anomalies(&agg.daily_revenue);
        let forecast = forecast_next_7_days(&agg.daily_revenue);
        let suggestions = suggestions(&Signals {
            total_revenue: agg.total_revenue,
            avg_order_value: agg.avg_order_value,
            overdue_count: agg.overdue_count,
            overdue_total: agg.overdue_total,
            top_customers: &agg.top_customers,
            top_products: &agg.top_products,
            anomalies: &anomalies,
        });

        SalesReport {
            from: agg.from,
            to: agg.to,
            total_revenue: agg.total_revenue,
            avg_order_value: agg.avg_order_value,
            orders: agg.orders,
            unique_customers: agg.unique_customers,
            top_customers: agg.top_customers,
            top_products: agg.top_products,
            daily_revenue: agg.daily_revenue,
            retention_rate: agg.retention_rate,
            forecast_next_7_days_total: forecast,
            anomalies,
            overdue_count: agg.overdue_count,
            overdue_total: agg.overdue_total,
            suggestions,
            exec_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn sale(day_offset: u64, customer: &str, amount: f64, status: &str) -> Sale {
        Sale {
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap() + Days::new(day_offset),
            customer: customer.into(),
            product: "Widget".into(),
            amount,
            status: status.into(),
        }
    }

    #[test]
    fn empty_sales_give_empty_report() {
        let report = AnalyzerImpl::new().build_report(Vec::new());
        assert_eq!(report, SalesReport::default());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn steady_series_gets_fallback_suggestion() {
        let sales = (0..10).map(|d| sale(d, "Acme", 100.0, "paid")).collect();
        let report = AnalyzerImpl::new().build_report(sales);

        assert!(report.anomalies.is_empty());
        assert_eq!(report.forecast_next_7_days_total, 700.0);
        assert_eq!(report.avg_order_value, 100.0);
        assert!((report.retention_rate - 1.0).abs() < f64::EPSILON);
        assert!(report.suggestions.last().unwrap().starts_with("Steady performance."));
    }

    #[test]
    fn spike_is_reported_and_suggested() {
        let mut sales: Vec<Sale> = (0..9).map(|d| sale(d, "Acme", 100.0, "paid")).collect();
        sales.push(sale(9, "Zen", 2000.0, "paid"));
        let report = AnalyzerImpl::new().build_report(sales);

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].day, NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());
        assert!(report.suggestions.iter().any(|s| s.starts_with("Spike on 2025-07-10")));
        assert!(!report.suggestions.iter().any(|s| s.starts_with("Steady")));
    }

    #[test]
    fn top_n_is_configurable() {
        let sales = vec![
            sale(0, "Acme", 10.0, "paid"),
            sale(0, "Zen", 20.0, "paid"),
            sale(0, "Atlas", 30.0, "paid"),
        ];
        let report = AnalyzerImpl::with_top_n(2).build_report(sales);
        assert_eq!(report.top_customers.len(), 2);
        assert_eq!(report.top_customers[0].key, "Atlas");
        assert_eq!(report.unique_customers, 3);
    }
}
