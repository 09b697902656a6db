//! Data models for metric insight computation.

mod anomaly_point;
mod decomposition_result;
mod time_series;
mod trend_change_point;
mod trend_result;

pub use anomaly_point::AnomalyPoint;
pub use decomposition_result::DecompositionResult;
pub use time_series::{validate_points, validate_values, TimeSeries};
pub use trend_change_point::TrendChangePoint;
pub use trend_result::{ComparisonPeriod, Severity, TrendDirection, TrendResult};
