//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::trend::moving_average;
use crate::models::indicators::{BollingerSeries, IndicatorSeries};

pub const BOLL_MIDDLE: &str = "BOLL_MID";
pub const BOLL_UPPER: &str = "BOLL_UP";
pub const BOLL_LOWER: &str = "BOLL_LOW";

pub fn bollinger_name(period: usize, std_dev_multiplier: f64) -> String {
    format!("BOLL({},{})", period, std_dev_multiplier)
}

/// Calculate Bollinger Bands
///
/// Middle Band = MA(period)
/// Upper Band = Middle + (multiplier * sample standard deviation)
/// Lower Band = Middle - (multiplier * sample standard deviation)
///
/// The standard deviation uses the `n - 1` divisor, so a period below 2
/// leaves the bands undefined.
pub fn bollinger_bands(closes: &[f64], period: usize, std_dev_multiplier: f64) -> BollingerSeries {
    let middle = moving_average(closes, period).values;
    let std = math::rolling_sample_std_dev(closes, period);

    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];
    for (i, (m, s)) in middle.iter().zip(&std).enumerate() {
        if let (Some(m), Some(s)) = (m, s) {
            upper[i] = Some(m + std_dev_multiplier * s);
            lower[i] = Some(m - std_dev_multiplier * s);
        }
    }

    BollingerSeries {
        middle: IndicatorSeries::new(BOLL_MIDDLE, middle),
        upper: IndicatorSeries::new(BOLL_UPPER, upper),
        lower: IndicatorSeries::new(BOLL_LOWER, lower),
    }
}

/// Calculate Bollinger Bands with default parameters (20 MA, 2σ)
pub fn bollinger_bands_default(closes: &[f64]) -> BollingerSeries {
    bollinger_bands(closes, 20, 2.0)
}
