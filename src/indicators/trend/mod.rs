//! Trend indicators: simple and exponential moving averages

pub mod ema;
pub mod ma;

pub use ema::*;
pub use ma::*;
