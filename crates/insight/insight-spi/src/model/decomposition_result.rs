//! Decomposition result model

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// Additive split of a series into trend, seasonal and residual components.
///
/// All four sequences share the input length. When `degraded` is set the
/// input was too short to decompose: `trend` mirrors `original`, the other
/// components are zero and both strengths are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Input values
    pub original: Vec<f64>,
    /// Trend component
    pub trend: Vec<f64>,
    /// Seasonal component
    pub seasonal: Vec<f64>,
    /// Residual component
    pub residual: Vec<f64>,
    /// Share of non-trend variance explained by seasonality, in `[0, 1]`
    pub seasonal_strength: f64,
    /// Share of non-seasonal variance explained by the trend, in `[0, 1]`
    pub trend_strength: f64,
    /// Set when the input had fewer samples than required
    pub degraded: bool,
    /// Failure encountered while decomposing, if any
    pub error: Option<InsightError>,
}

impl DecompositionResult {
    /// Pass-through result: trend mirrors the input, everything else is zero.
    pub fn passthrough(values: &[f64]) -> Self {
        let n = values.len();
        Self {
            original: values.to_vec(),
            trend: values.to_vec(),
            seasonal: vec![0.0; n],
            residual: vec![0.0; n],
            seasonal_strength: 0.0,
            trend_strength: 0.0,
            degraded: false,
            error: None,
        }
    }

    /// Result for inputs below the minimum sample count.
    pub fn degraded(values: &[f64]) -> Self {
        Self {
            degraded: true,
            ..Self::passthrough(values)
        }
    }

    /// Pass-through result annotated with the failure that prevented decomposition.
    pub fn failed(values: &[f64], error: InsightError) -> Self {
        Self {
            error: Some(error),
            ..Self::passthrough(values)
        }
    }

    /// Whether the components carry real decomposition output.
    pub fn is_usable(&self) -> bool {
        !self.degraded && self.error.is_none()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}
