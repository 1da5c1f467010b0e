//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod signal;

pub use bar::PriceBar;
pub use indicators::{
    BandPosition, BandValue, BollingerSeries, IndicatorSeries, IndicatorSet, IndicatorSnapshot,
    MaSnapshot, MacdSeries, MacdValue, PricePosition,
};
pub use signal::{
    AnalysisReport, Confidence, CrossEvent, CrossKind, MacdTrend, MacdTrendEvent, Signal,
    SignalAction, SignalEvent, ThresholdEvent, ThresholdKind, ThresholdSource, TrendAlignment,
    TrendEvent,
};
