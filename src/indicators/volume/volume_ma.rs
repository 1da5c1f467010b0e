//! Volume moving average indicator

use crate::common::math;
use crate::models::bar::{self, PriceBar};
use crate::models::indicators::IndicatorSeries;

pub fn volume_ma_name(period: usize) -> String {
    format!("VOL_MA{}", period)
}

/// Trailing mean of traded volume over `period` bars.
pub fn volume_moving_average(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        volume_ma_name(period),
        math::rolling_mean(&bar::volumes(bars), period),
    )
}
