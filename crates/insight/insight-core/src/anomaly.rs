//! Z-score anomaly scoring.

use insight_api::AnomalyConfig;
use insight_spi::{validate_values, AnomalyPoint, AnomalyScorer};

use crate::stats::{mean, std_dev};

// ============================================================================
// Z-Score Scorer
// ============================================================================

/// Flags points more than `threshold` population standard deviations from the mean.
#[derive(Debug, Clone)]
pub struct ZScoreScorer {
    threshold: f64,
}

impl ZScoreScorer {
    /// Create a new scorer with the given z-score threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Create from configuration.
    pub fn from_config(config: &AnomalyConfig) -> Self {
        Self::new(config.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ZScoreScorer {
    fn default() -> Self {
        Self::from_config(&AnomalyConfig::default())
    }
}

impl AnomalyScorer for ZScoreScorer {
    fn detect(&self, values: &[f64]) -> Vec<AnomalyPoint> {
        detect_anomalies(values, self.threshold)
    }
}

/// Absolute z-score of every value; `None` when the series has no spread
/// or contains non-finite values.
pub fn z_scores(values: &[f64]) -> Option<Vec<f64>> {
    validate_values(values).ok()?;
    let std = std_dev(values);
    if std == 0.0 {
        return None;
    }
    let m = mean(values);
    Some(values.iter().map(|v| ((v - m) / std).abs()).collect())
}

/// Points whose absolute z-score is strictly greater than `threshold`, in index order.
///
/// A constant, empty or non-finite series has no detectable anomalies.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Vec<AnomalyPoint> {
    let Some(scores) = z_scores(values) else {
        return Vec::new();
    };
    values
        .iter()
        .zip(scores)
        .enumerate()
        .filter(|(_, (_, z))| *z > threshold)
        .map(|(index, (&value, z_score))| AnomalyPoint {
            index,
            value,
            z_score,
        })
        .collect()
}
