//! Numeric helpers shared by the indicator implementations.

pub mod math;
