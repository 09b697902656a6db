//! Orchestration of the decomposition, trend and anomaly stages.
//!
//! The stages themselves are pure and silent; this layer composes them,
//! applies the skip-on-degraded rule for anomalies and reports degraded or
//! failed stages through `tracing`.

use insight_api::InsightConfig;
use insight_spi::{
    AnomalyPoint, AnomalyScorer, DecompositionResult, Decomposer, TimeSeries, TrendAnalyzer,
    TrendChangePoint, TrendResult,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, warn};

use crate::anomaly::ZScoreScorer;
use crate::decomposition::SeasonalDecomposer;
use crate::trend::LinearTrendAnalyzer;

/// Everything derived from one metric's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInsight {
    /// Metric name
    pub metric: String,
    pub decomposition: DecompositionResult,
    pub trend: TrendResult,
    /// Residual anomalies; empty when the decomposition was not usable
    pub anomalies: Vec<AnomalyPoint>,
    pub change_points: Vec<TrendChangePoint>,
    /// Linear forecast `forecast_horizon` days past the last point
    pub forecast: f64,
}

impl MetricInsight {
    /// Whether any stage fell back to a degraded or failed result.
    pub fn has_warnings(&self) -> bool {
        !self.decomposition.is_usable() || self.trend.error.is_some()
    }
}

/// Runs the three stages over a metric.
#[derive(Debug, Clone)]
pub struct InsightPipeline {
    decomposer: SeasonalDecomposer,
    analyzer: LinearTrendAnalyzer,
    scorer: ZScoreScorer,
    forecast_horizon: usize,
}

impl Default for InsightPipeline {
    fn default() -> Self {
        Self::new(&InsightConfig::default())
    }
}

impl InsightPipeline {
    /// Build the stages from configuration.
    pub fn new(config: &InsightConfig) -> Self {
        Self {
            decomposer: SeasonalDecomposer::from_config(&config.decomposition),
            analyzer: LinearTrendAnalyzer::new(config.trend.clone()),
            scorer: ZScoreScorer::from_config(&config.anomaly),
            forecast_horizon: config.trend.forecast_horizon,
        }
    }

    pub fn decomposer(&self) -> &SeasonalDecomposer {
        &self.decomposer
    }

    pub fn analyzer(&self) -> &LinearTrendAnalyzer {
        &self.analyzer
    }

    pub fn scorer(&self) -> &ZScoreScorer {
        &self.scorer
    }

    /// Decompose the series and score its residual.
    ///
    /// Anomaly detection is skipped when the decomposition is degraded or
    /// failed, since its residual is then all zeros.
    pub fn detect_residual_anomalies(
        &self,
        series: &TimeSeries,
    ) -> (DecompositionResult, Vec<AnomalyPoint>) {
        let decomposition = self.decomposer.decompose(series.values());
        let anomalies = self.residual_anomalies(&decomposition);
        (decomposition, anomalies)
    }

    /// Analyze one metric.
    pub fn analyze(&self, series: &TimeSeries) -> MetricInsight {
        let span = debug_span!("analyze_metric", metric = series.name(), samples = series.len());
        let _enter = span.enter();

        let (decomposition, trend) = rayon::join(
            || self.decomposer.decompose(series.values()),
            || self.analyzer.analyze_trend(series.values(), series.timestamps()),
        );
        let anomalies = self.residual_anomalies(&decomposition);
        let change_points = self
            .analyzer
            .detect_trend_changes(series.values(), series.timestamps());
        let forecast = self.analyzer.forecast_next_value(
            series.values(),
            series.timestamps(),
            self.forecast_horizon,
        );

        if decomposition.degraded {
            warn!(
                metric = series.name(),
                samples = series.len(),
                required = self.decomposer.min_samples(),
                "Decomposition degraded, skipping anomaly detection"
            );
        }
        if let Some(error) = &decomposition.error {
            warn!(metric = series.name(), error = %error, "Decomposition failed");
        }
        if let Some(error) = &trend.error {
            warn!(metric = series.name(), error = %error, "Trend analysis failed");
        }
        if trend.endpoint_fallback {
            debug!(
                metric = series.name(),
                period = %self.analyzer.config().period,
                "Comparison window did not split the series, compared first and last values"
            );
        }
        debug!(
            seasonal_strength = decomposition.seasonal_strength,
            trend_strength = decomposition.trend_strength,
            direction = %trend.direction,
            severity = %trend.severity,
            anomalies = anomalies.len(),
            change_points = change_points.len(),
            peaks = change_points.iter().filter(|c| c.is_peak()).count(),
            "Metric analyzed"
        );

        MetricInsight {
            metric: series.name().to_string(),
            decomposition,
            trend,
            anomalies,
            change_points,
            forecast,
        }
    }

    /// Analyze many metrics in parallel, preserving input order.
    pub fn analyze_batch(&self, series: &[TimeSeries]) -> Vec<MetricInsight> {
        let insights: Vec<MetricInsight> = series.par_iter().map(|s| self.analyze(s)).collect();
        info!(
            metrics = insights.len(),
            with_warnings = insights.iter().filter(|i| i.has_warnings()).count(),
            anomalies = insights.iter().map(|i| i.anomalies.len()).sum::<usize>(),
            "Batch analyzed"
        );
        insights
    }

    /// Series values with the seasonal component removed.
    pub fn adjust_for_seasonality(&self, series: &TimeSeries) -> Vec<f64> {
        self.decomposer.adjust_for_seasonality(series.values())
    }

    /// Seasonal extrapolation `periods_ahead` points past the series.
    pub fn predict_seasonal_pattern(&self, series: &TimeSeries, periods_ahead: usize) -> Vec<f64> {
        self.decomposer
            .predict_seasonal_pattern(series.values(), periods_ahead)
    }

    fn residual_anomalies(&self, decomposition: &DecompositionResult) -> Vec<AnomalyPoint> {
        if decomposition.is_usable() {
            self.scorer.detect(&decomposition.residual)
        } else {
            Vec::new()
        }
    }
}
