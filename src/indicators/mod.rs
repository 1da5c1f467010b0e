//! Indicator library: pure transforms of a bar sequence into aligned series.

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::*;
pub use trend::*;
pub use volatility::*;
pub use volume::*;

use crate::error::AnalysisError;

/// Fail with `InsufficientData` when fewer than `period` bars are available.
///
/// The indicator functions themselves never fail on short input; this is for
/// callers that refuse partial series.
pub fn require_history(available: usize, period: usize, indicator: &str) -> Result<(), AnalysisError> {
    if available < period {
        return Err(AnalysisError::InsufficientData {
            indicator: indicator.to_string(),
            required: period,
            available,
        });
    }
    Ok(())
}
