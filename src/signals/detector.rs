//! Turns aligned indicator series into discrete events at the latest bar.
//!
//! The detector performs no weighting. An event category whose inputs are
//! undefined at the latest bar is left out instead of failing the analysis.

use crate::config::AnalysisConfig;
use crate::indicators::volatility::bollinger_name;
use crate::models::bar::PriceBar;
use crate::models::indicators::{IndicatorSeries, IndicatorSet};
use crate::models::signal::{
    CrossEvent, CrossKind, MacdTrend, MacdTrendEvent, SignalEvent, ThresholdEvent, ThresholdKind,
    ThresholdSource, TrendAlignment, TrendEvent,
};

/// Cross between `fast` and `slow` at index `i`, comparing with `i - 1`.
///
/// Golden: `fast[i-1] <= slow[i-1]` and `fast[i] > slow[i]`.
/// Death: `fast[i-1] >= slow[i-1]` and `fast[i] < slow[i]`.
pub fn cross_at(fast: &IndicatorSeries, slow: &IndicatorSeries, i: usize) -> Option<CrossKind> {
    let prev = i.checked_sub(1)?;
    let (f0, s0) = (fast.get(prev)?, slow.get(prev)?);
    let (f1, s1) = (fast.get(i)?, slow.get(i)?);

    if f0 <= s0 && f1 > s1 {
        Some(CrossKind::GoldenCross)
    } else if f0 >= s0 && f1 < s1 {
        Some(CrossKind::DeathCross)
    } else {
        None
    }
}

/// Cross at the most recent transition only.
pub fn latest_cross(fast: &IndicatorSeries, slow: &IndicatorSeries) -> Option<CrossEvent> {
    let last = fast.len().min(slow.len()).checked_sub(1)?;
    cross_event(fast, slow, last)
}

/// Every cross in the series, oldest first. Historical context only; the
/// detector itself reports just the latest one.
pub fn cross_history(fast: &IndicatorSeries, slow: &IndicatorSeries) -> Vec<CrossEvent> {
    (1..fast.len().min(slow.len()))
        .filter_map(|i| cross_event(fast, slow, i))
        .collect()
}

fn cross_event(fast: &IndicatorSeries, slow: &IndicatorSeries, i: usize) -> Option<CrossEvent> {
    cross_at(fast, slow, i).map(|kind| CrossEvent {
        kind,
        at_index: i,
        fast_name: fast.name.clone(),
        slow_name: slow.name.clone(),
    })
}

pub fn classify_rsi(value: f64, overbought: f64, oversold: f64) -> ThresholdKind {
    if value > overbought {
        ThresholdKind::Overbought
    } else if value < oversold {
        ThresholdKind::Oversold
    } else {
        ThresholdKind::Normal
    }
}

/// Close above the upper band reads overbought, below the lower band oversold.
pub fn classify_band(close: f64, upper: f64, lower: f64) -> ThresholdKind {
    if close > upper {
        ThresholdKind::Overbought
    } else if close < lower {
        ThresholdKind::Oversold
    } else {
        ThresholdKind::Normal
    }
}

/// Alignment of MA values ordered from shortest to longest period.
pub fn trend_alignment(values: &[f64]) -> TrendAlignment {
    if values.len() < 2 {
        return TrendAlignment::Mixed;
    }
    if values.windows(2).all(|w| w[0] > w[1]) {
        TrendAlignment::Bullish
    } else if values.windows(2).all(|w| w[0] < w[1]) {
        TrendAlignment::Bearish
    } else {
        TrendAlignment::Mixed
    }
}

pub fn macd_trend(histogram: f64) -> MacdTrend {
    if histogram > 0.0 {
        MacdTrend::Bullish
    } else if histogram < 0.0 {
        MacdTrend::Bearish
    } else {
        MacdTrend::Neutral
    }
}

/// Event detector parameterised by the analysis configuration.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    cross_fast: usize,
    cross_slow: usize,
    ma_periods: Vec<usize>,
    overbought: f64,
    oversold: f64,
    band_name: String,
}

impl SignalDetector {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            cross_fast: config.crossover.fast,
            cross_slow: config.crossover.slow,
            ma_periods: config.sorted_ma_periods(),
            overbought: config.rsi.overbought,
            oversold: config.rsi.oversold,
            band_name: bollinger_name(config.bollinger.period, config.bollinger.std_dev_multiplier),
        }
    }

    /// Events for the latest bar, in this order: MA cross, MACD cross,
    /// MA alignment, MACD trend, RSI threshold, Bollinger threshold.
    pub fn detect(&self, set: &IndicatorSet, bars: &[PriceBar]) -> Vec<SignalEvent> {
        let mut events = Vec::new();

        if let Some(cross) = self.detect_ma_cross(set) {
            events.push(SignalEvent::Cross(cross));
        }
        if let Some(cross) = latest_cross(&set.macd.dif, &set.macd.dea) {
            events.push(SignalEvent::Cross(cross));
        }
        if let Some(trend) = self.detect_alignment(set) {
            events.push(SignalEvent::Trend(trend));
        }
        if let Some(histogram) = set.macd.histogram.latest() {
            events.push(SignalEvent::MacdTrend(MacdTrendEvent {
                trend: macd_trend(histogram),
                histogram,
            }));
        }
        if let Some(value) = set.rsi.latest() {
            events.push(SignalEvent::Threshold(ThresholdEvent {
                kind: classify_rsi(value, self.overbought, self.oversold),
                source: ThresholdSource::Rsi,
                indicator_name: set.rsi.name.clone(),
                value,
            }));
        }
        if let Some(event) = self.detect_band_breakout(set, bars) {
            events.push(SignalEvent::Threshold(event));
        }

        events
    }

    fn detect_ma_cross(&self, set: &IndicatorSet) -> Option<CrossEvent> {
        let fast = set.moving_average(self.cross_fast)?;
        let slow = set.moving_average(self.cross_slow)?;
        latest_cross(fast, slow)
    }

    fn detect_alignment(&self, set: &IndicatorSet) -> Option<TrendEvent> {
        if self.ma_periods.len() < 2 {
            return None;
        }

        let mut values = Vec::with_capacity(self.ma_periods.len());
        let mut ma_names = Vec::with_capacity(self.ma_periods.len());
        for period in &self.ma_periods {
            let series = set.moving_average(*period)?;
            values.push(series.latest()?);
            ma_names.push(series.name.clone());
        }

        Some(TrendEvent {
            alignment: trend_alignment(&values),
            ma_names,
        })
    }

    fn detect_band_breakout(&self, set: &IndicatorSet, bars: &[PriceBar]) -> Option<ThresholdEvent> {
        let close = bars.last()?.close;
        let upper = set.bollinger.upper.latest()?;
        let lower = set.bollinger.lower.latest()?;

        Some(ThresholdEvent {
            kind: classify_band(close, upper, lower),
            source: ThresholdSource::Bollinger,
            indicator_name: self.band_name.clone(),
            value: close,
        })
    }
}
