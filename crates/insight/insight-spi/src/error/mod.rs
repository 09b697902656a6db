//! Error types for metric insight computation.

mod insight_error;

pub use insight_error::{InsightError, Result};
