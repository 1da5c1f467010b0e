//! RSI (Relative Strength Index) indicator

use crate::models::indicators::IndicatorSeries;

/// RSI reported for a window with neither gains nor losses.
pub const FLAT_RSI: f64 = 50.0;

pub fn rsi_name(period: usize) -> String {
    format!("RSI{}", period)
}

/// Calculate RSI over a trailing window of `period` bar-to-bar deltas.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// A window without losses reads 100; a window without any movement reads
/// [`FLAT_RSI`]. Indices below `period` are undefined.
pub fn rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return IndicatorSeries::new(rsi_name(period), values);
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    // delta j sits between closes j and j + 1
    for i in period..closes.len() {
        let window = i - period..i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
        values[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    IndicatorSeries::new(rsi_name(period), values)
}

/// Calculate RSI with default period (14)
pub fn rsi_default(closes: &[f64]) -> IndicatorSeries {
    rsi(closes, 14)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { FLAT_RSI } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
