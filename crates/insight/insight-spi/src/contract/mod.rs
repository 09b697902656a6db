//! Contract definitions for metric insight components.
//!
//! This module contains trait definitions that providers must implement.

mod anomaly_scorer;
mod decomposer;
mod trend_analyzer;

pub use anomaly_scorer::AnomalyScorer;
pub use decomposer::Decomposer;
pub use trend_analyzer::TrendAnalyzer;
