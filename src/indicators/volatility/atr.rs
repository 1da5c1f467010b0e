//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::bar::PriceBar;
use crate::models::indicators::IndicatorSeries;

pub fn atr_name(period: usize) -> String {
    format!("ATR{}", period)
}

/// True range per bar: the largest of high - low, |high - prev close| and
/// |low - prev close|. The first bar has no previous close and uses high - low.
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = bar.high - bar.low;
            match i.checked_sub(1).map(|p| bars[p].close) {
                Some(prev_close) => range
                    .max((bar.high - prev_close).abs())
                    .max((bar.low - prev_close).abs()),
                None => range,
            }
        })
        .collect()
}

/// Trailing simple mean of the true range over `period` bars.
pub fn average_true_range(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        atr_name(period),
        math::rolling_mean(&true_range(bars), period),
    )
}

/// Calculate ATR with default period (14)
pub fn average_true_range_default(bars: &[PriceBar]) -> IndicatorSeries {
    average_true_range(bars, 14)
}
