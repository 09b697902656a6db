//! Seasonal decomposition
//!
//! Additive split `Y = T + S + R` using a centered moving average for the
//! trend and per-phase averaging of the detrended series for the seasonal
//! pattern. This is a lightweight approximation, not STL.

use insight_api::DecompositionConfig;
use insight_spi::{validate_values, DecompositionResult, Decomposer, InsightError, Result};

use crate::seasonal;
use crate::stats::{mean, variance, variance_share};

/// Moving-average additive decomposer.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposer {
    seasonal_period: usize,
    min_samples: usize,
}

impl SeasonalDecomposer {
    /// Create a decomposer for the given cycle length and minimum sample count.
    pub fn new(seasonal_period: usize, min_samples: usize) -> Self {
        Self {
            seasonal_period,
            min_samples,
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &DecompositionConfig) -> Self {
        Self::new(config.seasonal_period, config.min_samples)
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Values with the seasonal component removed.
    pub fn adjust_for_seasonality(&self, values: &[f64]) -> Vec<f64> {
        seasonal::adjust_for_seasonality(&self.decompose(values))
    }

    /// Extrapolate `periods_ahead` values from the last trend level plus the last seasonal cycle.
    pub fn predict_seasonal_pattern(&self, values: &[f64], periods_ahead: usize) -> Vec<f64> {
        seasonal::predict_seasonal_pattern(
            &self.decompose(values),
            self.seasonal_period,
            periods_ahead,
        )
    }
}

impl Default for SeasonalDecomposer {
    fn default() -> Self {
        Self::from_config(&DecompositionConfig::default())
    }
}

impl Decomposer for SeasonalDecomposer {
    fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    fn decompose(&self, values: &[f64]) -> DecompositionResult {
        decompose(values, self.seasonal_period, self.min_samples)
    }
}

/// Decompose `values` into trend, seasonal and residual components.
///
/// Inputs shorter than `min_samples` produce a degraded pass-through
/// result. Invalid inputs (zero period, non-finite values) produce a
/// pass-through result carrying the error.
pub fn decompose(values: &[f64], seasonal_period: usize, min_samples: usize) -> DecompositionResult {
    if values.len() < min_samples {
        return DecompositionResult::degraded(values);
    }
    try_decompose(values, seasonal_period)
        .unwrap_or_else(|error| DecompositionResult::failed(values, error))
}

fn try_decompose(values: &[f64], seasonal_period: usize) -> Result<DecompositionResult> {
    if seasonal_period == 0 {
        return Err(InsightError::invalid_parameter(
            "seasonal_period",
            "must be at least 1",
        ));
    }
    validate_values(values)?;

    let trend = moving_average_trend(values, seasonal_period);
    let detrended: Vec<f64> = values.iter().zip(&trend).map(|(v, t)| v - t).collect();
    let pattern = seasonal_pattern(&detrended, seasonal_period);
    let seasonal: Vec<f64> = (0..values.len())
        .map(|i| pattern[i % seasonal_period])
        .collect();
    let residual: Vec<f64> = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((v, t), s)| v - t - s)
        .collect();

    if let Some(index) = residual.iter().position(|r| !r.is_finite()) {
        return Err(InsightError::NumericalError(format!(
            "residual overflowed at index {}",
            index
        )));
    }

    let residual_variance = variance(&residual);
    let seasonal_strength = variance_share(variance(&seasonal), residual_variance);
    let trend_strength = variance_share(variance(&trend), residual_variance);
    if !(seasonal_strength.is_finite() && trend_strength.is_finite()) {
        return Err(InsightError::NumericalError(
            "component variance is not finite".to_string(),
        ));
    }

    Ok(DecompositionResult {
        original: values.to_vec(),
        trend,
        seasonal,
        residual,
        seasonal_strength,
        trend_strength,
        degraded: false,
        error: None,
    })
}

/// Centered moving average of width `period`.
///
/// Windows are clipped at the series edges, so the first and last
/// `period / 2` points average over fewer samples rather than padding.
pub fn moving_average_trend(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let half = period / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            mean(&values[start..end])
        })
        .collect()
}

/// Mean detrended value per phase, centered to zero mean.
///
/// Phases with no samples (series shorter than one cycle) contribute zero
/// before centering.
pub fn seasonal_pattern(detrended: &[f64], period: usize) -> Vec<f64> {
    let averages: Vec<f64> = (0..period)
        .map(|phase| {
            let members: Vec<f64> = detrended.iter().skip(phase).step_by(period).copied().collect();
            mean(&members)
        })
        .collect();
    let offset = mean(&averages);
    averages.into_iter().map(|a| a - offset).collect()
}
