//! Anomaly point model.

use serde::{Deserialize, Serialize};

/// A point whose z-score exceeded the detection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    /// Position in the scored series
    pub index: usize,
    /// Scored value (residual or raw, depending on the input)
    pub value: f64,
    /// Absolute z-score
    pub z_score: f64,
}
