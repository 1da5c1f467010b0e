//! Analysis engine: indicators, then events, then one classified signal.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::{
    average_true_range, bollinger_bands, macd, moving_average, rsi, volume_moving_average,
};
use crate::models::bar::{self, PriceBar};
use crate::models::indicators::{IndicatorSet, IndicatorSnapshot};
use crate::models::signal::{AnalysisReport, Signal};
use crate::signals::classifier::CompositeClassifier;
use crate::signals::detector::SignalDetector;

/// Stateless analyzer for one configuration.
///
/// Every call recomputes from the bars it is given; nothing is cached
/// between calls, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TechnicalAnalyzer {
    config: AnalysisConfig,
    detector: SignalDetector,
    classifier: CompositeClassifier,
}

impl TechnicalAnalyzer {
    /// Validate `config` and build the detector and classifier for it.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let detector = SignalDetector::new(&config);
        let classifier = CompositeClassifier::new(&config);
        Ok(Self {
            config,
            detector,
            classifier,
        })
    }

    /// Swap in a custom classifier, e.g. one built with extra rules.
    pub fn with_classifier(mut self, classifier: CompositeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, bars: &[PriceBar]) -> Result<AnalysisReport, AnalysisError> {
        self.run(None, bars)
    }

    pub fn analyze_symbol(
        &self,
        symbol: &str,
        bars: &[PriceBar],
    ) -> Result<AnalysisReport, AnalysisError> {
        self.run(Some(symbol.to_string()), bars)
    }

    fn run(&self, symbol: Option<String>, bars: &[PriceBar]) -> Result<AnalysisReport, AnalysisError> {
        validate_bars(bars)?;
        let latest = bars.last().ok_or_else(empty_input)?;

        let indicators = self.compute_indicators(bars);
        let snapshot = IndicatorSnapshot::from_set(&indicators, bars).ok_or_else(empty_input)?;

        let events = self.detector.detect(&indicators, bars);
        let signal = if indicators.all_undefined_at_latest() {
            Signal::insufficient_data()
        } else {
            self.classifier.classify(&events)
        };

        Ok(AnalysisReport {
            symbol,
            as_of: latest.date,
            bar_count: bars.len(),
            latest_close: latest.close,
            indicators,
            snapshot,
            events,
            signal,
        })
    }

    /// Compute every configured series. Short input yields partially or
    /// fully undefined series, never an error.
    pub fn compute_indicators(&self, bars: &[PriceBar]) -> IndicatorSet {
        let closes = bar::closes(bars);
        let config = &self.config;

        let moving_averages = config
            .sorted_ma_periods()
            .into_iter()
            .map(|period| (period, moving_average(&closes, period)))
            .collect();

        IndicatorSet {
            moving_averages,
            macd: macd(&closes, config.macd.fast, config.macd.slow, config.macd.signal),
            rsi: rsi(&closes, config.rsi.period),
            bollinger: bollinger_bands(
                &closes,
                config.bollinger.period,
                config.bollinger.std_dev_multiplier,
            ),
            atr: average_true_range(bars, config.atr.period),
            volume_ma: volume_moving_average(bars, config.volume_ma.period),
        }
    }
}

/// Require at least one bar, finite OHLCV values and strictly ascending
/// dates.
pub fn validate_bars(bars: &[PriceBar]) -> Result<(), AnalysisError> {
    if bars.is_empty() {
        return Err(empty_input());
    }
    for (index, bar) in bars.iter().enumerate() {
        if let Some(field) = bar.non_finite_field() {
            return Err(AnalysisError::NonFiniteValue {
                index,
                date: bar.date,
                field,
            });
        }
        if let Some(previous) = index.checked_sub(1).map(|p| &bars[p]) {
            if bar.date <= previous.date {
                return Err(AnalysisError::UnorderedInput {
                    index,
                    previous: previous.date,
                    current: bar.date,
                });
            }
        }
    }
    Ok(())
}

fn empty_input() -> AnalysisError {
    AnalysisError::InsufficientData {
        indicator: "price history".to_string(),
        required: 1,
        available: 0,
    }
}
