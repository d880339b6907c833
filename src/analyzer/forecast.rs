use crate::model::DailyPoint;

pub const FORECAST_WINDOW: usize = 7;

/// Naive next-7-days projection: mean of the trailing window (at most seven
/// points) times seven. An empty series forecasts zero.
pub fn forecast_next_7_days(daily: &[DailyPoint]) -> f64 {
    let values: Vec<f64> = daily.iter().map(|p| p.value).collect();
    let window = FORECAST_WINDOW.min(values.len());
    moving_average(&values, window)
        .last()
        .map_or(0.0, |avg| avg * 7.0)
}

/// Simple moving average over a slice with the given window size.
pub fn moving_average(data: &[f64], window_size: usize) -> Vec<f64> {
    if window_size == 0 || data.len() < window_size {
        return Vec::new();
    }
    data.windows(window_size)
        .map(|window| window.iter().sum::<f64>() / window_size as f64)
        .collect()
}
