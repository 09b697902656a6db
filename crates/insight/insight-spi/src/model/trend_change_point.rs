//! Trend change point model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boundary where the slope of the preceding window and the following
/// window have opposite signs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendChangePoint {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Slope of the window ending just before `index`
    pub previous_slope: f64,
    /// Slope of the window starting at `index`
    pub next_slope: f64,
}

impl TrendChangePoint {
    /// True when the slope turned from rising to falling.
    pub fn is_peak(&self) -> bool {
        self.previous_slope > 0.0 && self.next_slope < 0.0
    }
}
