//! Metric Insight Core
//!
//! Implementations of the decomposition, trend and anomaly stages, the
//! numeric helpers they share, and the pipeline that composes them.

pub mod anomaly;
pub mod decomposition;
pub mod pipeline;
pub mod seasonal;
pub mod stats;
pub mod trend;

// Re-export SPI traits for implementations
pub use insight_spi::{
    AnomalyPoint, AnomalyScorer, ComparisonPeriod, DecompositionResult, Decomposer,
    InsightError, Result, Severity, TimeSeries, TrendAnalyzer, TrendChangePoint,
    TrendDirection, TrendResult,
};

// Re-export main types
pub use anomaly::{detect_anomalies, ZScoreScorer};
pub use decomposition::{decompose, SeasonalDecomposer};
pub use pipeline::{InsightPipeline, MetricInsight};
pub use seasonal::{adjust_for_seasonality, predict_seasonal_pattern};
pub use trend::{analyze_trend, detect_trend_changes, forecast_next_value, LinearTrendAnalyzer};
