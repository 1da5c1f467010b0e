use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::{IndicatorSet, IndicatorSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossKind {
    GoldenCross,
    DeathCross,
}

/// Two series inverted their ordering between `at_index - 1` and `at_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossEvent {
    pub kind: CrossKind,
    pub at_index: usize,
    pub fast_name: String,
    pub slow_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdKind {
    Overbought,
    Oversold,
    Normal,
}

/// Which indicator a threshold reading refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    Rsi,
    Bollinger,
}

/// Latest value of an indicator compared to configured bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEvent {
    pub kind: ThresholdKind,
    pub source: ThresholdSource,
    pub indicator_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendAlignment {
    Bullish,
    Bearish,
    Mixed,
}

/// Relative order of the moving averages at the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEvent {
    pub alignment: TrendAlignment,
    /// Moving averages ordered from shortest to longest period.
    pub ma_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdTrend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdTrendEvent {
    pub trend: MacdTrend,
    pub histogram: f64,
}

/// One discrete observation at the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalEvent {
    Cross(CrossEvent),
    Threshold(ThresholdEvent),
    Trend(TrendEvent),
    MacdTrend(MacdTrendEvent),
}

impl fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalEvent::Cross(c) => {
                let verb = match c.kind {
                    CrossKind::GoldenCross => "golden cross",
                    CrossKind::DeathCross => "death cross",
                };
                write!(
                    f,
                    "{}: {} crossed {} {} at bar {}",
                    verb,
                    c.fast_name,
                    if c.kind == CrossKind::GoldenCross { "above" } else { "below" },
                    c.slow_name,
                    c.at_index
                )
            }
            SignalEvent::Threshold(t) => {
                let state = match t.kind {
                    ThresholdKind::Overbought => "overbought",
                    ThresholdKind::Oversold => "oversold",
                    ThresholdKind::Normal => "normal",
                };
                match t.source {
                    ThresholdSource::Rsi => write!(f, "{} {} ({:.2})", t.indicator_name, state, t.value),
                    ThresholdSource::Bollinger => {
                        let where_ = match t.kind {
                            ThresholdKind::Overbought => "above upper band",
                            ThresholdKind::Oversold => "below lower band",
                            ThresholdKind::Normal => "within bands",
                        };
                        write!(f, "close {:.2} {} of {}", t.value, where_, t.indicator_name)
                    }
                }
            }
            SignalEvent::Trend(t) => {
                let state = match t.alignment {
                    TrendAlignment::Bullish => "bullish alignment",
                    TrendAlignment::Bearish => "bearish alignment",
                    TrendAlignment::Mixed => "mixed alignment",
                };
                write!(f, "{} ({})", state, t.ma_names.join("/"))
            }
            SignalEvent::MacdTrend(m) => {
                let state = match m.trend {
                    MacdTrend::Bullish => "bullish",
                    MacdTrend::Bearish => "bearish",
                    MacdTrend::Neutral => "neutral",
                };
                write!(f, "MACD {} (histogram {:.4})", state, m.histogram)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

pub const INSUFFICIENT_DATA: &str = "insufficient data";
pub const NO_RULE_MATCHED: &str = "no rule matched";

/// The classifier's verdict for the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    pub confidence: Confidence,
    /// Id of the rule that produced the action, `None` for a fallback HOLD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub contributing_events: Vec<SignalEvent>,
    pub rationale: String,
}

impl Signal {
    pub fn hold(rationale: impl Into<String>) -> Self {
        Self {
            action: SignalAction::Hold,
            confidence: Confidence::Low,
            rule: None,
            contributing_events: Vec::new(),
            rationale: rationale.into(),
        }
    }

    pub fn insufficient_data() -> Self {
        Self::hold(INSUFFICIENT_DATA)
    }
}

/// Everything one analysis call produces, ready for a report layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub as_of: NaiveDate,
    pub bar_count: usize,
    pub latest_close: f64,
    pub indicators: IndicatorSet,
    pub snapshot: IndicatorSnapshot,
    pub events: Vec<SignalEvent>,
    pub signal: Signal,
}
