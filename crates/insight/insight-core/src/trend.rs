//! Trend analysis
//!
//! Linear regression over elapsed days, period-over-period change,
//! direction/severity grading and confidence scoring, plus slope-reversal
//! detection and linear extrapolation.

use chrono::{DateTime, Duration, Utc};
use insight_api::TrendConfig;
use insight_spi::{
    validate_points, ComparisonPeriod, Result, Severity, TrendAnalyzer, TrendChangePoint,
    TrendDirection, TrendResult,
};

use crate::stats::{elapsed_days, linear_fit, mean, std_dev};

/// Linear-regression trend analyzer.
#[derive(Debug, Clone, Default)]
pub struct LinearTrendAnalyzer {
    config: TrendConfig,
}

impl LinearTrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }
}

impl TrendAnalyzer for LinearTrendAnalyzer {
    fn analyze_trend(&self, values: &[f64], timestamps: &[DateTime<Utc>]) -> TrendResult {
        analyze_trend(
            values,
            timestamps,
            self.config.period,
            self.config.significance_threshold,
            self.config.min_samples,
        )
    }

    fn detect_trend_changes(
        &self,
        values: &[f64],
        timestamps: &[DateTime<Utc>],
    ) -> Vec<TrendChangePoint> {
        detect_trend_changes(values, timestamps, self.config.change_window)
    }

    fn forecast_next_value(
        &self,
        values: &[f64],
        timestamps: &[DateTime<Utc>],
        periods_ahead: usize,
    ) -> f64 {
        forecast_next_value(values, timestamps, periods_ahead)
    }
}

/// Comparison of the latest window against everything before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodChange {
    pub baseline: f64,
    pub current: f64,
    pub absolute_change: f64,
    /// Percent change relative to `baseline`; zero when the baseline is zero
    pub percentage_change: f64,
    /// Set when one side of the cutoff was empty
    pub endpoint_fallback: bool,
}

/// Compare the mean of points within `period` of the last timestamp with
/// the mean of the older points.
///
/// When every point falls on one side of the cutoff, the first and last
/// values are compared instead.
pub fn period_change(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    period: ComparisonPeriod,
) -> PeriodChange {
    let (baseline, current, endpoint_fallback) = match timestamps.last() {
        Some(&last) => {
            let cutoff = last - Duration::days(period.days());
            let (recent, old): (Vec<(f64, bool)>, Vec<(f64, bool)>) = values
                .iter()
                .zip(timestamps)
                .map(|(&v, &t)| (v, t >= cutoff))
                .partition(|&(_, is_recent)| is_recent);

            if recent.is_empty() || old.is_empty() {
                endpoints(values)
            } else {
                let recent: Vec<f64> = recent.into_iter().map(|(v, _)| v).collect();
                let old: Vec<f64> = old.into_iter().map(|(v, _)| v).collect();
                (mean(&old), mean(&recent), false)
            }
        }
        None => endpoints(values),
    };

    let absolute_change = current - baseline;
    let percentage_change = if baseline == 0.0 {
        0.0
    } else {
        absolute_change / baseline * 100.0
    };

    PeriodChange {
        baseline,
        current,
        absolute_change,
        percentage_change,
        endpoint_fallback,
    }
}

fn endpoints(values: &[f64]) -> (f64, f64, bool) {
    let first = values.first().copied().unwrap_or(0.0);
    let last = values.last().copied().unwrap_or(0.0);
    (first, last, true)
}

/// Coefficient of variation in percent; zero when the mean is zero.
pub fn volatility(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    std_dev(values) / m.abs() * 100.0
}

/// Blend of fit quality, sample size and magnitude of change, in `[0, 1]`.
pub fn confidence(r_squared: f64, sample_count: usize, percentage_change: f64) -> f64 {
    let sample_factor = (sample_count as f64 / 30.0).min(1.0);
    let magnitude_factor = (percentage_change.abs() / 50.0).min(1.0);
    (0.4 * r_squared + 0.3 * sample_factor + 0.3 * magnitude_factor).clamp(0.0, 1.0)
}

/// Assess the direction, size and reliability of a metric's movement.
///
/// `significance_threshold` is a fraction (`0.10` means 10%). Fewer than
/// `min_samples` points give a neutral, insignificant result; invalid
/// input gives a neutral result carrying the error.
pub fn analyze_trend(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    period: ComparisonPeriod,
    significance_threshold: f64,
    min_samples: usize,
) -> TrendResult {
    try_analyze_trend(values, timestamps, period, significance_threshold, min_samples)
        .unwrap_or_else(|error| TrendResult::failed(values.len(), error))
}

fn try_analyze_trend(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    period: ComparisonPeriod,
    significance_threshold: f64,
    min_samples: usize,
) -> Result<TrendResult> {
    validate_points(values, timestamps)?;
    let sample_count = values.len();
    if sample_count == 0 || sample_count < min_samples {
        return Ok(TrendResult::degenerate(sample_count));
    }

    let fit = linear_fit(&elapsed_days(timestamps), values);
    let change = period_change(values, timestamps, period);
    let percentage_change = change.percentage_change;

    Ok(TrendResult {
        direction: TrendDirection::from_percentage_change(percentage_change),
        percentage_change,
        absolute_change: change.absolute_change,
        is_significant: percentage_change.abs() >= significance_threshold * 100.0,
        slope: fit.slope,
        r_squared: fit.r_squared,
        volatility: volatility(values),
        severity: Severity::from_percentage_change(percentage_change),
        confidence: confidence(fit.r_squared, sample_count, percentage_change),
        sample_count,
        endpoint_fallback: change.endpoint_fallback,
        error: None,
    })
}

/// Find boundaries where the slope before and after have opposite signs.
///
/// Every boundary `i` from `window_size` up to (excluding) `n - window_size`
/// compares the fit over the preceding `window_size` points with the fit
/// over the following `window_size` points. A flat window on either side is
/// not a reversal. Consecutive boundaries reversing in the same direction
/// describe one turn and are reported once, at the first boundary of the
/// run. Invalid input yields no change points.
pub fn detect_trend_changes(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    window_size: usize,
) -> Vec<TrendChangePoint> {
    let n = values.len();
    if window_size == 0
        || window_size.checked_mul(2).map_or(true, |w| n < w)
        || validate_points(values, timestamps).is_err()
    {
        return Vec::new();
    }

    let xs = elapsed_days(timestamps);
    let mut changes = Vec::new();
    // (boundary, is_peak) of the last reversal seen
    let mut last_reversal: Option<(usize, bool)> = None;

    for i in window_size..n - window_size {
        let previous_slope =
            linear_fit(&xs[i - window_size..i], &values[i - window_size..i]).slope;
        let next_slope =
            linear_fit(&xs[i..i + window_size], &values[i..i + window_size]).slope;
        if previous_slope * next_slope >= 0.0 {
            continue;
        }

        let change = TrendChangePoint {
            index: i,
            timestamp: timestamps[i],
            value: values[i],
            previous_slope,
            next_slope,
        };
        let peak = change.is_peak();
        let continues_run = matches!(
            last_reversal,
            Some((prev, was_peak)) if prev + 1 == i && was_peak == peak
        );
        last_reversal = Some((i, peak));
        if !continues_run {
            changes.push(change);
        }
    }
    changes
}

/// Extrapolate the full-series regression `periods_ahead` days past the last value.
///
/// An empty series forecasts zero; invalid input falls back to the last value.
pub fn forecast_next_value(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    periods_ahead: usize,
) -> f64 {
    let Some(&last) = values.last() else {
        return 0.0;
    };
    if validate_points(values, timestamps).is_err() {
        return last;
    }
    let fit = linear_fit(&elapsed_days(timestamps), values);
    last + fit.slope * periods_ahead as f64
}
