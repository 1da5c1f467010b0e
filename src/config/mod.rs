//! Analysis configuration.
//!
//! The engine only ever receives an [`AnalysisConfig`] value from its caller.
//! File loading lives here for the command-line surface.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{AnalysisError, ConfigError};

/// Environment variable naming a JSON config file for the `analyze` binary
/// when `--config` is not given.
pub const CONFIG_PATH_VAR: &str = "QUANTLENS_CONFIG";

/// Get the deployment environment (`APP_ENV`, defaults to `sandbox`).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    pub fast: usize,
    pub slow: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self { fast: 5, slow: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub std_dev_multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrConfig {
    pub period: usize,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMaConfig {
    pub period: usize,
}

impl Default for VolumeMaConfig {
    fn default() -> Self {
        Self { period: 5 }
    }
}

/// Every tunable of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ma_periods: Vec<usize>,
    /// Moving-average pair checked for golden / death crosses.
    pub crossover: CrossoverConfig,
    pub macd: MacdConfig,
    pub rsi: RsiConfig,
    pub bollinger: BollingerConfig,
    pub atr: AtrConfig,
    pub volume_ma: VolumeMaConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20, 60],
            crossover: CrossoverConfig::default(),
            macd: MacdConfig::default(),
            rsi: RsiConfig::default(),
            bollinger: BollingerConfig::default(),
            atr: AtrConfig::default(),
            volume_ma: VolumeMaConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Configuration with a custom MA period set. The crossover pair is kept
    /// when both of its periods are still listed, otherwise it becomes the
    /// shortest and longest of the new periods.
    pub fn with_ma_periods(mut self, periods: &[usize]) -> Self {
        let mut sorted = periods.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let keeps_pair =
            sorted.contains(&self.crossover.fast) && sorted.contains(&self.crossover.slow);
        if !keeps_pair {
            if let (Some(&fast), Some(&slow)) = (sorted.first(), sorted.last()) {
                self.crossover = CrossoverConfig { fast, slow };
            }
        }
        self.ma_periods = sorted;
        self
    }

    pub fn with_crossover(mut self, fast: usize, slow: usize) -> Self {
        self.crossover = CrossoverConfig { fast, slow };
        self
    }

    pub fn with_macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.macd = MacdConfig { fast, slow, signal };
        self
    }

    pub fn with_rsi(mut self, period: usize, overbought: f64, oversold: f64) -> Self {
        self.rsi = RsiConfig {
            period,
            overbought,
            oversold,
        };
        self
    }

    pub fn with_bollinger(mut self, period: usize, std_dev_multiplier: f64) -> Self {
        self.bollinger = BollingerConfig {
            period,
            std_dev_multiplier,
        };
        self
    }

    /// MA periods sorted ascending with duplicates removed.
    pub fn sorted_ma_periods(&self) -> Vec<usize> {
        let mut periods = self.ma_periods.clone();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    /// Reject periods of zero, inverted fast/slow pairs and inconsistent
    /// thresholds.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.ma_periods.is_empty() {
            return invalid("ma_periods must not be empty");
        }
        if self.ma_periods.contains(&0) {
            return invalid("ma_periods must be positive");
        }

        let cross = &self.crossover;
        if cross.fast >= cross.slow {
            return invalid(format!(
                "crossover fast period {} must be shorter than slow period {}",
                cross.fast, cross.slow
            ));
        }
        for period in [cross.fast, cross.slow] {
            if !self.ma_periods.contains(&period) {
                return invalid(format!("crossover period {} is not listed in ma_periods", period));
            }
        }

        let macd = &self.macd;
        if macd.fast == 0 || macd.slow == 0 || macd.signal == 0 {
            return invalid("macd periods must be positive");
        }
        if macd.fast >= macd.slow {
            return invalid(format!(
                "macd fast period {} must be shorter than slow period {}",
                macd.fast, macd.slow
            ));
        }

        let rsi = &self.rsi;
        if rsi.period == 0 {
            return invalid("rsi period must be positive");
        }
        for (name, value) in [("overbought", rsi.overbought), ("oversold", rsi.oversold)] {
            if !(0.0..=100.0).contains(&value) {
                return invalid(format!("rsi {} threshold {} must be within [0, 100]", name, value));
            }
        }
        if rsi.overbought <= rsi.oversold {
            return invalid(format!(
                "rsi overbought {} must be above oversold {}",
                rsi.overbought, rsi.oversold
            ));
        }

        let bollinger = &self.bollinger;
        if bollinger.period < 2 {
            return invalid("bollinger period must be at least 2");
        }
        if !bollinger.std_dev_multiplier.is_finite() || bollinger.std_dev_multiplier <= 0.0 {
            return invalid("bollinger std_dev_multiplier must be a positive number");
        }

        if self.atr.period == 0 {
            return invalid("atr period must be positive");
        }
        if self.volume_ma.period == 0 {
            return invalid("volume_ma period must be positive");
        }

        Ok(())
    }

    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid<T>(message: impl Into<String>) -> Result<T, AnalysisError> {
    Err(AnalysisError::InvalidConfiguration(message.into()))
}
