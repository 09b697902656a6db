//! Trend assessment model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// Direction of a period-over-period move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    /// Moves smaller than this many percent are `Stable`.
    pub const STABLE_BAND: f64 = 2.0;

    /// Classify a percentage change.
    pub fn from_percentage_change(percentage_change: f64) -> Self {
        if percentage_change.abs() < Self::STABLE_BAND {
            Self::Stable
        } else if percentage_change > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Severity of a trend, graded on the absolute percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Grade `|percentage_change|`: 50 and above is critical, then 30, 15 and 10.
    pub fn from_percentage_change(percentage_change: f64) -> Self {
        let magnitude = percentage_change.abs();
        if magnitude >= 50.0 {
            Self::Critical
        } else if magnitude >= 30.0 {
            Self::High
        } else if magnitude >= 15.0 {
            Self::Medium
        } else if magnitude >= 10.0 {
            Self::Low
        } else {
            Self::Info
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Comparison window for period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonPeriod {
    /// Week over week
    #[default]
    Wow,
    /// Month over month
    Mom,
    /// Quarter over quarter
    Qoq,
    /// Year over year
    Yoy,
}

impl ComparisonPeriod {
    /// Length of the comparison window in days.
    pub fn days(&self) -> i64 {
        match self {
            ComparisonPeriod::Wow => 7,
            ComparisonPeriod::Mom => 30,
            ComparisonPeriod::Qoq => 90,
            ComparisonPeriod::Yoy => 365,
        }
    }
}

impl fmt::Display for ComparisonPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComparisonPeriod::Wow => "wow",
            ComparisonPeriod::Mom => "mom",
            ComparisonPeriod::Qoq => "qoq",
            ComparisonPeriod::Yoy => "yoy",
        };
        f.write_str(label)
    }
}

impl FromStr for ComparisonPeriod {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wow" => Ok(ComparisonPeriod::Wow),
            "mom" => Ok(ComparisonPeriod::Mom),
            "qoq" => Ok(ComparisonPeriod::Qoq),
            "yoy" => Ok(ComparisonPeriod::Yoy),
            other => Err(InsightError::invalid_parameter(
                "period",
                format!("unknown comparison period '{}', expected wow, mom, qoq or yoy", other),
            )),
        }
    }
}

/// Directional trend assessment of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Period-over-period change in percent
    pub percentage_change: f64,
    /// Period-over-period change in metric units
    pub absolute_change: f64,
    pub is_significant: bool,
    /// Regression slope in metric units per day
    pub slope: f64,
    /// Goodness of fit of the regression, in `[0, 1]`
    pub r_squared: f64,
    /// Coefficient of variation in percent
    pub volatility: f64,
    pub severity: Severity,
    /// Blended confidence score, in `[0, 1]`
    pub confidence: f64,
    /// Number of samples the assessment was computed from
    pub sample_count: usize,
    /// Set when the cutoff left one side empty and the first and last
    /// values were compared instead of window means
    pub endpoint_fallback: bool,
    /// Failure encountered while analyzing, if any
    pub error: Option<InsightError>,
}

impl TrendResult {
    /// Neutral result: stable, insignificant, all statistics zero.
    pub fn degenerate(sample_count: usize) -> Self {
        Self {
            direction: TrendDirection::Stable,
            percentage_change: 0.0,
            absolute_change: 0.0,
            is_significant: false,
            slope: 0.0,
            r_squared: 0.0,
            volatility: 0.0,
            severity: Severity::Info,
            confidence: 0.0,
            sample_count,
            endpoint_fallback: false,
            error: None,
        }
    }

    /// Neutral result annotated with the failure that prevented analysis.
    pub fn failed(sample_count: usize, error: InsightError) -> Self {
        Self {
            error: Some(error),
            ..Self::degenerate(sample_count)
        }
    }
}
