//! Trait for trend analysis

use chrono::{DateTime, Utc};

use crate::model::{TrendChangePoint, TrendResult};

/// Scores the direction and strength of a metric's movement over time.
pub trait TrendAnalyzer: Send + Sync {
    /// Assess period-over-period change, regression fit and confidence.
    fn analyze_trend(&self, values: &[f64], timestamps: &[DateTime<Utc>]) -> TrendResult;

    /// Find boundaries where adjacent windows have slopes of opposite sign.
    fn detect_trend_changes(
        &self,
        values: &[f64],
        timestamps: &[DateTime<Utc>],
    ) -> Vec<TrendChangePoint>;

    /// Linear extrapolation `periods_ahead` days past the last value.
    fn forecast_next_value(
        &self,
        values: &[f64],
        timestamps: &[DateTime<Utc>],
        periods_ahead: usize,
    ) -> f64;
}
