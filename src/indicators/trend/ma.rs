//! MA (simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::IndicatorSeries;

pub fn ma_name(period: usize) -> String {
    format!("MA{}", period)
}

/// Trailing arithmetic mean of `period` closes.
///
/// Always returns a full-length series; indices below `period - 1` are
/// undefined. Whether a partial series is usable is the caller's decision.
pub fn moving_average(closes: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(ma_name(period), math::rolling_mean(closes, period))
}

/// Moving averages for several periods at once, in the given order.
pub fn moving_averages(closes: &[f64], periods: &[usize]) -> Vec<IndicatorSeries> {
    periods
        .iter()
        .map(|&period| moving_average(closes, period))
        .collect()
}
