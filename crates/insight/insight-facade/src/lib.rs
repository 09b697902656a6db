//! Metric Insight Facade
//!
//! Unified re-exports for the metric insight engine.
//!
//! This facade provides a single entry point to all functionality:
//! - Models, errors and the `Decomposer`/`TrendAnalyzer`/`AnomalyScorer` contracts from SPI
//! - Configuration types from API
//! - Stage implementations and the `InsightPipeline` orchestrator from Core

// Re-export everything from SPI
pub use insight_spi::*;

// Re-export everything from API
pub use insight_api::*;

// Explicit re-exports for documentation
pub use insight_api::prelude;

// Re-export core modules for direct access
pub use insight_core::{anomaly, decomposition, pipeline, seasonal, stats, trend};

// Re-export implementations at root
pub use insight_core::{
    adjust_for_seasonality, analyze_trend, decompose, detect_anomalies, detect_trend_changes,
    forecast_next_value, predict_seasonal_pattern, InsightPipeline, LinearTrendAnalyzer,
    MetricInsight, SeasonalDecomposer, ZScoreScorer,
};
