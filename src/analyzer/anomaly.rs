use crate::model::{Anomaly, DailyPoint};

/// Series shorter than this produce no anomalies.
pub const MIN_POINTS: usize = 7;
pub const Z_THRESHOLD: f64 = 2.0;

/// Population mean and standard deviation (divides by N).
pub fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    (mean, variance.sqrt())
}

/// Flags every day whose z-score over the whole series is at least
/// `Z_THRESHOLD` in magnitude. Output keeps the day order of the input.
pub fn detect_anomalies(daily: &[DailyPoint]) -> Vec<Anomaly> {
    if daily.len() < MIN_POINTS {
        return Vec::new();
    }

    let values: Vec<f64> = daily.iter().map(|p| p.value).collect();
    let (mean, std_dev) = mean_std_dev(&values);
    if std_dev == 0.0 {
        return Vec::new();
    }

    daily
        .iter()
        .filter_map(|p| {
            let z = (p.value - mean) / std_dev;
            (z.abs() >= Z_THRESHOLD).then(|| Anomaly {
                day: p.day,
                value: p.value,
                z,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn series(values: &[f64]) -> Vec<DailyPoint> {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DailyPoint {
                day: start + Days::new(i as u64),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn short_series_has_no_anomalies() {
        assert!(detect_anomalies(&series(&[1.0, 1.0, 1.0, 1.0, 1.0, 1000.0])).is_empty());
        assert!(detect_anomalies(&[]).is_empty());
    }

    #[test]
    fn flat_series_has_no_anomalies() {
        assert!(detect_anomalies(&series(&[42.0; 10])).is_empty());
    }

    #[test]
    fn flags_spike() {
        let daily = series(&[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 800.0]);
        let anomalies = detect_anomalies(&daily);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].day, daily[7].day);
        assert_eq!(anomalies[0].value, 800.0);
        // mean 187.5, std dev 231.5..., z = 612.5 / 231.5 = 2.6457
        assert!((anomalies[0].z - 7f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn flags_dip_with_negative_z() {
        let daily = series(&[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, -600.0]);
        let anomalies = detect_anomalies(&daily);
        assert_eq!(anomalies.len(), 1);
        assert!(anomalies[0].z < -2.0);
    }

    #[test]
    fn uses_population_std_dev() {
        let (mean, std_dev) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean, 5.0);
        assert_eq!(std_dev, 2.0);
    }
}
