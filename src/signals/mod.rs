//! Event detection, rule-based classification and the analysis engine.

pub mod classifier;
pub mod detector;
pub mod engine;

pub use classifier::{default_rules, CompositeClassifier, EventView, Rule};
pub use detector::SignalDetector;
pub use engine::TechnicalAnalyzer;
