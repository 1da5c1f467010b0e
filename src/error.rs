//! Error types for the analysis engine and its caller-side collaborators.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by a single analysis call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("insufficient data for {indicator}: need {required} bars, got {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("bars must be strictly ascending by date: bar {index} ({current}) follows {previous}")]
    UnorderedInput {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("bar {index} ({date}) has a non-finite {field}")]
    NonFiniteValue {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised while loading bars from a quote source.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read quote file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse quote file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no bars available for symbol '{0}'")]
    UnknownSymbol(String),
}

/// Errors raised while loading an analysis configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] AnalysisError),
}
