//! Command-line surface of the `analyze` binary.
//!
//! Argument parsing and the load / analyze sequence live in the library so
//! they can be driven from tests; the binary only adds logging and output.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{AnalysisConfig, CONFIG_PATH_VAR};
use crate::error::{AnalysisError, ConfigError, ProviderError};
use crate::models::signal::AnalysisReport;
use crate::services::{JsonFileQuoteProvider, QuoteProvider};
use crate::signals::TechnicalAnalyzer;

/// Technical analysis of one symbol's daily bars, printed as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "analyze", version, about)]
pub struct Args {
    /// Quote file: a JSON array of bars, or an object mapping symbols to arrays
    pub bars: PathBuf,

    /// Symbol to analyze [default: the quote file's stem]
    pub symbol: Option<String>,

    /// JSON analysis config; missing fields take defaults
    #[arg(long, env = CONFIG_PATH_VAR)]
    pub config: Option<PathBuf>,

    /// Analyze only the most recent N bars
    #[arg(long)]
    pub limit: Option<usize>,
}

impl Args {
    pub fn symbol(&self) -> String {
        self.symbol.clone().unwrap_or_else(|| {
            self.bars
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "UNKNOWN".to_string())
        })
    }

    pub fn load_config(&self) -> Result<AnalysisConfig, ConfigError> {
        match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path),
            None => Ok(AnalysisConfig::default()),
        }
    }
}

/// CLI-level failures mapped to process exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Analysis(AnalysisError::InvalidConfiguration(_)) => 2,
            Self::Provider(_) => 3,
            Self::Analysis(_) => 4,
            Self::Serialization(_) => 10,
        }
    }
}

/// Load the config and bars named by `args` and analyze them.
pub fn run(args: &Args) -> Result<AnalysisReport, CliError> {
    let symbol = args.symbol();
    let analyzer = TechnicalAnalyzer::new(args.load_config()?)?;
    let bars = JsonFileQuoteProvider::new(&args.bars).get_bars(&symbol, args.limit)?;
    Ok(analyzer.analyze_symbol(&symbol, &bars)?)
}
