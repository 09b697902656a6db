//! Trait for anomaly scoring

use crate::model::AnomalyPoint;

/// Flags points of a series that deviate strongly from the rest.
pub trait AnomalyScorer: Send + Sync {
    /// Score a residual (or raw) series and return the flagged points in index order.
    fn detect(&self, values: &[f64]) -> Vec<AnomalyPoint>;
}
