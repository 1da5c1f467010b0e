//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::IndicatorSeries;

pub fn ema_name(period: usize) -> String {
    format!("EMA{}", period)
}

/// EMA of closing prices.
///
/// Seeded with the simple mean of the first `period` closes at index
/// `period - 1`, then `ema[i] = close[i] * k + ema[i - 1] * (1 - k)` with
/// `k = 2 / (period + 1)`.
pub fn exponential_moving_average(closes: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        ema_name(period),
        math::ema_series(&math::defined(closes), period),
    )
}

/// EMA of a series that itself has an undefined prefix (e.g. MACD DIF).
pub fn exponential_moving_average_of(
    series: &IndicatorSeries,
    period: usize,
    name: impl Into<String>,
) -> IndicatorSeries {
    IndicatorSeries::new(name, math::ema_series(&series.values, period))
}
