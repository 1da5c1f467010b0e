//! # quantlens
//!
//! Technical analysis engine for a single equity's daily price history.
//!
//! A call to [`TechnicalAnalyzer::analyze`] runs three stages over the bars:
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Indicator library | [`indicators`] | MA, EMA, MACD, RSI, Bollinger, ATR, volume MA series |
//! | Signal detector | [`signals::detector`] | crosses, thresholds, trend and MACD events at the latest bar |
//! | Composite classifier | [`signals::classifier`] | BUY / SELL / HOLD with a rationale |
//!
//! The result is an [`AnalysisReport`] meant to be rendered by a report layer.
//!
//! ```rust,ignore
//! use quantlens::{AnalysisConfig, TechnicalAnalyzer};
//!
//! let analyzer = TechnicalAnalyzer::new(AnalysisConfig::default())?;
//! let report = analyzer.analyze_symbol("600519.SH", &bars)?;
//! println!("{:?}: {}", report.signal.action, report.signal.rationale);
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ConfigError, ProviderError};
pub use models::{AnalysisReport, PriceBar, Signal, SignalAction, SignalEvent};
pub use signals::TechnicalAnalyzer;
