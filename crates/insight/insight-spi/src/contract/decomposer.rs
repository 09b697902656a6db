//! Trait for time series decomposition

use crate::model::DecompositionResult;

/// Splits a value sequence into trend, seasonal and residual components.
///
/// Implementations never fail outright: short inputs yield a degraded
/// result and invalid inputs a result carrying an error.
pub trait Decomposer: Send + Sync {
    /// Number of samples per seasonal cycle.
    fn seasonal_period(&self) -> usize;

    /// Decompose a value sequence.
    fn decompose(&self, values: &[f64]) -> DecompositionResult;
}
