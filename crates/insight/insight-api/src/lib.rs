//! Metric Insight API
//!
//! Configuration types for the metric insight engine.
//!
//! This crate provides:
//! - Per-component configuration with the engine's default thresholds
//! - Validation and TOML loading for the combined configuration
//! - Re-exports from the SPI for convenience

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export SPI types
pub use insight_spi::{
    AnomalyPoint, AnomalyScorer, ComparisonPeriod, DecompositionResult, Decomposer,
    InsightError, Result, Severity, TimeSeries, TrendAnalyzer, TrendChangePoint,
    TrendDirection, TrendResult,
};

// ============================================================================
// Component Configuration
// ============================================================================

/// Seasonal decomposition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Samples per seasonal cycle (default: 7, weekly cycle on daily data).
    pub seasonal_period: usize,
    /// Minimum samples before a full decomposition is attempted (default: 14).
    pub min_samples: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            seasonal_period: 7,
            min_samples: 14,
        }
    }
}

impl DecompositionConfig {
    pub fn new(seasonal_period: usize, min_samples: usize) -> Self {
        Self {
            seasonal_period,
            min_samples,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.seasonal_period == 0 {
            return Err(InsightError::invalid_parameter(
                "seasonal_period",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Trend analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Comparison window for period-over-period change (default: week over week).
    pub period: ComparisonPeriod,
    /// Fraction of change considered significant (default: 0.10, i.e. 10%).
    pub significance_threshold: f64,
    /// Minimum samples before a trend is computed (default: 7).
    pub min_samples: usize,
    /// Window size for change point detection (default: 14).
    pub change_window: usize,
    /// Days ahead to forecast (default: 1).
    pub forecast_horizon: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            period: ComparisonPeriod::Wow,
            significance_threshold: 0.10,
            min_samples: 7,
            change_window: 14,
            forecast_horizon: 1,
        }
    }
}

impl TrendConfig {
    pub fn new(period: ComparisonPeriod) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.significance_threshold) {
            return Err(InsightError::invalid_parameter(
                "significance_threshold",
                "must be a fraction in [0, 1]",
            ));
        }
        if self.change_window == 0 {
            return Err(InsightError::invalid_parameter(
                "change_window",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Z-score anomaly configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Z-score above which a point is flagged (default: 2.0).
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { threshold: 2.0 }
    }
}

impl AnomalyConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(InsightError::invalid_parameter(
                "threshold",
                "must be a finite, non-negative z-score",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Combined Configuration
// ============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] InsightError),
}

/// Configuration for the full insight pipeline.
///
/// Every section is optional in TOML; missing sections and keys take
/// their defaults.
///
/// ```toml
/// [decomposition]
/// seasonal_period = 7
///
/// [trend]
/// period = "mom"
///
/// [anomaly]
/// threshold = 2.5
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub decomposition: DecompositionConfig,
    pub trend: TrendConfig,
    pub anomaly: AnomalyConfig,
}

impl InsightConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.decomposition.validate()?;
        self.trend.validate()?;
        self.anomaly.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: InsightConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnomalyConfig, ConfigError, DecompositionConfig, InsightConfig, TrendConfig,
    };
    pub use insight_spi::{
        AnomalyPoint, AnomalyScorer, ComparisonPeriod, DecompositionResult, Decomposer,
        InsightError, Result, Severity, TimeSeries, TrendAnalyzer, TrendChangePoint,
        TrendDirection, TrendResult,
    };
}
