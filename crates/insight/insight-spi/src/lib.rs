//! Metric Insight Service Provider Interface
//!
//! Defines the models, errors and component contracts shared by the
//! decomposition, trend and anomaly stages.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalyScorer, Decomposer, TrendAnalyzer};
pub use error::{InsightError, Result};
pub use model::{
    validate_points, validate_values, AnomalyPoint, ComparisonPeriod, DecompositionResult,
    Severity, TimeSeries, TrendChangePoint, TrendDirection, TrendResult,
};
