//! Quote provider interface and a file-backed implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::bar::PriceBar;

pub trait QuoteProvider {
    /// Historical daily bars for `symbol`, ascending by date. `limit` keeps
    /// only the most recent bars.
    fn get_bars(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<PriceBar>, ProviderError>;

    /// Close of the most recent bar.
    fn get_latest_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        self.get_bars(symbol, Some(1))?
            .last()
            .map(|bar| bar.close)
            .ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))
    }
}

/// Accepted file layouts: a bare array of bars, or an object mapping
/// symbols to arrays of bars.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteFile {
    Single(Vec<PriceBar>),
    BySymbol(HashMap<String, Vec<PriceBar>>),
}

/// Reads bars from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct JsonFileQuoteProvider {
    path: PathBuf,
}

impl JsonFileQuoteProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuoteProvider for JsonFileQuoteProvider {
    fn get_bars(&self, symbol: &str, limit: Option<usize>) -> Result<Vec<PriceBar>, ProviderError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let mut bars = match serde_json::from_str::<QuoteFile>(&raw)? {
            QuoteFile::Single(bars) => bars,
            QuoteFile::BySymbol(mut by_symbol) => by_symbol
                .remove(symbol)
                .ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))?,
        };

        if bars.is_empty() {
            return Err(ProviderError::UnknownSymbol(symbol.to_string()));
        }

        if let Some(limit) = limit {
            let skip = bars.len().saturating_sub(limit);
            bars.drain(..skip);
        }

        debug!(
            symbol,
            bar_count = bars.len(),
            path = %self.path.display(),
            "Loaded bars from quote file"
        );
        Ok(bars)
    }
}
