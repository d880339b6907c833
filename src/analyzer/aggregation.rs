use crate::model::{DailyPoint, KeyValue, Sale};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Status substrings that mark an invoice as overdue/unpaid.
pub const OVERDUE_MARKERS: [&str; 3] = ["overdue", "unpaid", "due"];

/// Folded totals over a set of sales. Intermediate per-entity maps live only
/// inside `aggregate`; this keeps just what the report needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total_revenue: f64,
    pub orders: usize,
    pub avg_order_value: f64,
    pub unique_customers: usize,
    pub top_customers: Vec<KeyValue>,
    pub top_products: Vec<KeyValue>,
    pub daily_revenue: Vec<DailyPoint>,
    pub retention_rate: f64,
    pub overdue_count: usize,
    pub overdue_total: f64,
}

pub fn is_overdue(status: &str) -> bool {
    OVERDUE_MARKERS.iter().any(|marker| status.contains(marker))
}

/// Sorts the sales by date (stable) and folds them into aggregates.
pub fn aggregate(mut sales: Vec<Sale>, top_n: usize) -> Aggregates {
    sales.sort_by_key(|s| s.date);

    let mut total = 0.0;
    let mut by_customer: HashMap<&str, f64> = HashMap::new();
    let mut by_product: HashMap<&str, f64> = HashMap::new();
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut overdue_count = 0;
    let mut overdue_total = 0.0;

    for sale in &sales {
        total += sale.amount;
        *by_customer.entry(sale.customer.as_str()).or_default() += sale.amount;
        *by_product.entry(sale.product.as_str()).or_default() += sale.amount;
        *by_day.entry(sale.date).or_default() += sale.amount;

        if is_overdue(&sale.status) {
            overdue_count += 1;
            overdue_total += sale.amount;
        }
    }

    let orders = sales.len();
    let avg_order_value = if orders > 0 { total / orders as f64 } else { 0.0 };

    Aggregates {
        from: sales.first().map(|s| s.date),
        to: sales.last().map(|s| s.date),
        total_revenue: total,
        orders,
        avg_order_value,
        unique_customers: by_customer.len(),
        top_customers: top_n_by_value(&by_customer, top_n),
        top_products: top_n_by_value(&by_product, top_n),
        daily_revenue: by_day
            .into_iter()
            .map(|(day, value)| DailyPoint { day, value })
            .collect(),
        retention_rate: retention_rate(&sales),
        overdue_count,
        overdue_total,
    }
}

/// Highest values first; equal values are ordered by key ascending.
pub fn top_n_by_value(totals: &HashMap<&str, f64>, n: usize) -> Vec<KeyValue> {
    let mut entries: Vec<KeyValue> = totals
        .iter()
        .map(|(key, value)| KeyValue {
            key: (*key).to_string(),
            value: *value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    entries.truncate(n);
    entries
}

/// Share of customers seen in at least two distinct ISO weeks.
pub fn retention_rate(sales: &[Sale]) -> f64 {
    let mut weeks: HashMap<&str, HashSet<(i32, u32)>> = HashMap::new();
    for sale in sales {
        let week = sale.date.iso_week();
        weeks
            .entry(sale.customer.as_str())
            .or_default()
            .insert((week.year(), week.week()));
    }

    if weeks.is_empty() {
        return 0.0;
    }
    let retained = weeks.values().filter(|set| set.len() >= 2).count();
    retained as f64 / weeks.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(date: &str, customer: &str, product: &str, amount: f64, status: &str) -> Sale {
        Sale {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            customer: customer.into(),
            product: product.into(),
            amount,
            status: status.into(),
        }
    }

    fn sample() -> Vec<Sale> {
        vec![
            sale("2025-07-05", "Acme", "WidgetA", 199.0, "paid"),
            sale("2025-07-01", "Acme", "WidgetA", 199.0, "paid"),
            sale("2025-07-01", "Acme", "WidgetB", 89.0, "paid"),
            sale("2025-07-02", "Zen", "WidgetA", 199.0, "unpaid"),
            sale("2025-07-03", "Atlas", "WidgetC", 349.0, "paid"),
            sale("2025-07-04", "Zen", "WidgetA", 199.0, "overdue"),
        ]
    }

    #[test]
    fn folds_totals() {
        let agg = aggregate(sample(), 5);
        assert_eq!(agg.total_revenue, 1234.0);
        assert_eq!(agg.orders, 6);
        assert_eq!(agg.unique_customers, 3);
        assert_eq!(agg.overdue_count, 2);
        assert_eq!(agg.overdue_total, 398.0);
        assert!((agg.avg_order_value - 205.666_666).abs() < 1e-3);
        assert_eq!(agg.from, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(agg.to, NaiveDate::from_ymd_opt(2025, 7, 5));
    }

    #[test]
    fn daily_series_is_sorted_unique_and_sums_to_total() {
        let agg = aggregate(sample(), 5);
        let days: Vec<_> = agg.daily_revenue.iter().map(|p| p.day).collect();
        let mut sorted = days.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(days, sorted);
        assert_eq!(agg.daily_revenue.len(), 5);
        assert_eq!(agg.daily_revenue[0].value, 288.0);
        let sum: f64 = agg.daily_revenue.iter().map(|p| p.value).sum();
        assert!((sum - agg.total_revenue).abs() < 1e-9);
    }

    #[test]
    fn top_lists_are_sorted_by_revenue() {
        let agg = aggregate(sample(), 5);
        let customers: Vec<_> = agg.top_customers.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(customers, ["Acme", "Zen", "Atlas"]);
        assert_eq!(agg.top_customers[0].value, 487.0);
        let products: Vec<_> = agg.top_products.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(products, ["WidgetA", "WidgetC", "WidgetB"]);
    }

    #[test]
    fn ties_break_by_name_and_list_is_truncated() {
        let mut totals = HashMap::new();
        for name in ["f", "e", "d", "c", "b", "a"] {
            totals.insert(name, 10.0);
        }
        totals.insert("z", 11.0);
        let top = top_n_by_value(&totals, 5);
        let keys: Vec<_> = top.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, ["z", "a", "b", "c", "d"]);
    }

    #[test]
    fn overdue_includes_any_due_marker() {
        assert!(is_overdue("overdue"));
        assert!(is_overdue("unpaid"));
        assert!(is_overdue("due in 30 days"));
        assert!(!is_overdue("paid"));
        assert!(!is_overdue(""));
    }

    #[test]
    fn overdue_amounts_still_count_as_revenue() {
        let agg = aggregate(vec![sale("2025-07-01", "Acme", "A", 50.0, "overdue")], 5);
        assert_eq!(agg.total_revenue, 50.0);
        assert_eq!(agg.overdue_total, 50.0);
    }

    #[test]
    fn retention_counts_customers_in_two_iso_weeks() {
        // 2025-07-01 is ISO week 27, 2025-07-08 is week 28.
        let sales = vec![
            sale("2025-07-01", "Acme", "A", 1.0, ""),
            sale("2025-07-08", "Acme", "A", 1.0, ""),
            sale("2025-07-01", "Zen", "A", 1.0, ""),
            sale("2025-07-02", "Zen", "A", 1.0, ""),
        ];
        assert_eq!(retention_rate(&sales), 0.5);
    }

    #[test]
    fn retention_keys_on_iso_year_and_week() {
        // 2024-12-30 and 2025-01-02 are both in ISO week 2025-W01;
        // 2024-12-27 is in 2024-W52.
        let same_week = vec![
            sale("2024-12-30", "Acme", "A", 1.0, ""),
            sale("2025-01-02", "Acme", "A", 1.0, ""),
        ];
        assert_eq!(retention_rate(&same_week), 0.0);

        let two_weeks = vec![
            sale("2024-12-27", "Acme", "A", 1.0, ""),
            sale("2024-12-30", "Acme", "A", 1.0, ""),
        ];
        assert_eq!(retention_rate(&two_weeks), 1.0);
    }

    #[test]
    fn retention_is_zero_for_single_week_customers() {
        assert_eq!(retention_rate(&sample()), 0.0);
        assert_eq!(retention_rate(&[]), 0.0);
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let agg = aggregate(Vec::new(), 5);
        assert_eq!(agg, Aggregates::default());
    }
}
