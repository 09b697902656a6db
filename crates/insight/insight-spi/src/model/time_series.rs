//! Time series input model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};

/// A single metric's value history, ordered by timestamp.
///
/// Construction validates the series, so every `TimeSeries` in hand has
/// equal-length columns, strictly ascending timestamps and finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSeries")]
pub struct TimeSeries {
    name: String,
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTimeSeries {
    name: String,
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TryFrom<RawTimeSeries> for TimeSeries {
    type Error = InsightError;

    fn try_from(raw: RawTimeSeries) -> Result<Self> {
        Self::new(raw.name, raw.timestamps, raw.values)
    }
}

impl TimeSeries {
    /// Create a validated series from parallel timestamp and value columns.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
    ) -> Result<Self> {
        validate_points(&values, &timestamps)?;
        Ok(Self {
            name: name.into(),
            timestamps,
            values,
        })
    }

    /// Create a validated series from `(timestamp, value)` pairs.
    pub fn from_points<I>(name: impl Into<String>, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let (timestamps, values) = points.into_iter().unzip();
        Self::new(name, timestamps, values)
    }

    /// Metric name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Check that values are finite and that timestamps are parallel and strictly ascending.
pub fn validate_points(values: &[f64], timestamps: &[DateTime<Utc>]) -> Result<()> {
    if values.len() != timestamps.len() {
        return Err(InsightError::LengthMismatch {
            values: values.len(),
            timestamps: timestamps.len(),
        });
    }
    validate_values(values)?;
    if let Some(index) = timestamps
        .windows(2)
        .position(|pair| pair[1] <= pair[0])
    {
        return Err(InsightError::UnorderedTimestamps { index: index + 1 });
    }
    Ok(())
}

/// Check that every value is finite.
pub fn validate_values(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InsightError::NonFiniteValue { index }),
        None => Ok(()),
    }
}
