//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::{exponential_moving_average, exponential_moving_average_of};
use crate::models::indicators::{IndicatorSeries, MacdSeries};

pub const DIF: &str = "DIF";
pub const DEA: &str = "DEA";
pub const MACD_HISTOGRAM: &str = "MACD_HIST";

/// Calculate MACD lines
///
/// DIF = EMA(fast) - EMA(slow)
/// DEA = EMA(DIF, signal)
/// Histogram = DIF - DEA
///
/// DIF is first defined at `max(fast, slow) - 1`, DEA and the histogram at
/// `max(fast, slow) - 1 + signal - 1`.
pub fn macd(closes: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdSeries {
    let fast = exponential_moving_average(closes, fast_period);
    let slow = exponential_moving_average(closes, slow_period);

    let dif_values = fast
        .values
        .iter()
        .zip(&slow.values)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();
    let dif = IndicatorSeries::new(DIF, dif_values);

    let dea = exponential_moving_average_of(&dif, signal_period, DEA);

    let histogram_values = dif
        .values
        .iter()
        .zip(&dea.values)
        .map(|(d, e)| match (d, e) {
            (Some(d), Some(e)) => Some(d - e),
            _ => None,
        })
        .collect();

    MacdSeries {
        dif,
        dea,
        histogram: IndicatorSeries::new(MACD_HISTOGRAM, histogram_values),
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn macd_default(closes: &[f64]) -> MacdSeries {
    macd(closes, 12, 26, 9)
}
