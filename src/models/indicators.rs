use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::bar::PriceBar;

/// A named numeric series aligned 1:1 with the input bars.
///
/// Entries are `None` until enough history has accumulated for the
/// indicator to be computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` when out of range or not yet computable.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the latest bar.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Index of the first defined entry.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn is_defined_at_latest(&self) -> bool {
        self.latest().is_some()
    }
}

/// MACD lines: DIF (fast EMA minus slow EMA), DEA (signal EMA of DIF) and
/// their difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub dif: IndicatorSeries,
    pub dea: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Every series computed for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Simple moving averages keyed by period.
    pub moving_averages: BTreeMap<usize, IndicatorSeries>,
    pub macd: MacdSeries,
    pub rsi: IndicatorSeries,
    pub bollinger: BollingerSeries,
    pub atr: IndicatorSeries,
    pub volume_ma: IndicatorSeries,
}

impl IndicatorSet {
    pub fn moving_average(&self, period: usize) -> Option<&IndicatorSeries> {
        self.moving_averages.get(&period)
    }

    /// All series in a stable order: MAs by period, MACD, RSI, Bollinger,
    /// ATR, volume MA.
    pub fn series(&self) -> Vec<&IndicatorSeries> {
        let mut all: Vec<&IndicatorSeries> = self.moving_averages.values().collect();
        all.extend([
            &self.macd.dif,
            &self.macd.dea,
            &self.macd.histogram,
            &self.rsi,
            &self.bollinger.middle,
            &self.bollinger.upper,
            &self.bollinger.lower,
            &self.atr,
            &self.volume_ma,
        ]);
        all
    }

    /// True when no series has a value at the latest bar.
    pub fn all_undefined_at_latest(&self) -> bool {
        self.series().iter().all(|s| !s.is_defined_at_latest())
    }
}

/// Where the latest close sits relative to a reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    Above,
    Below,
    At,
}

impl PricePosition {
    pub fn of(price: f64, reference: f64) -> Self {
        if price > reference {
            PricePosition::Above
        } else if price < reference {
            PricePosition::Below
        } else {
            PricePosition::At
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaSnapshot {
    pub name: String,
    pub period: usize,
    pub value: f64,
    pub position: PricePosition,
    /// Signed distance of the close from the average, in percent of the average.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub dif: f64,
    pub dea: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub position: BandPosition,
}

/// Where the latest close sits relative to the Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    AboveUpper,
    Within,
    BelowLower,
}

impl BandPosition {
    pub fn of(price: f64, upper: f64, lower: f64) -> Self {
        if price > upper {
            BandPosition::AboveUpper
        } else if price < lower {
            BandPosition::BelowLower
        } else {
            BandPosition::Within
        }
    }
}

/// Latest-bar view of an [`IndicatorSet`], for reports that only show the
/// current reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub moving_averages: Vec<MaSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BandValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ma: Option<f64>,
}

impl IndicatorSnapshot {
    /// Build the snapshot for the latest bar. Returns `None` for empty input.
    pub fn from_set(set: &IndicatorSet, bars: &[PriceBar]) -> Option<Self> {
        let close = bars.last()?.close;

        let change_pct = match bars.len() {
            n if n >= 2 => percent_change(bars[n - 2].close, close),
            _ => None,
        };

        let moving_averages = set
            .moving_averages
            .iter()
            .filter_map(|(&period, series)| {
                let value = series.latest()?;
                Some(MaSnapshot {
                    name: series.name.clone(),
                    period,
                    value,
                    position: PricePosition::of(close, value),
                    distance_pct: percent_change(value, close),
                })
            })
            .collect();

        let macd = match (
            set.macd.dif.latest(),
            set.macd.dea.latest(),
            set.macd.histogram.latest(),
        ) {
            (Some(dif), Some(dea), Some(histogram)) => Some(MacdValue {
                dif,
                dea,
                histogram,
            }),
            _ => None,
        };

        let bollinger = match (
            set.bollinger.upper.latest(),
            set.bollinger.middle.latest(),
            set.bollinger.lower.latest(),
        ) {
            (Some(upper), Some(middle), Some(lower)) => Some(BandValue {
                upper,
                middle,
                lower,
                position: BandPosition::of(close, upper, lower),
            }),
            _ => None,
        };

        Some(Self {
            close,
            change_pct,
            moving_averages,
            macd,
            rsi: set.rsi.latest(),
            bollinger,
            atr: set.atr.latest(),
            volume_ma: set.volume_ma.latest(),
        })
    }
}

fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}
