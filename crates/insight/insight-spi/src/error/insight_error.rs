//! Metric insight error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating or computing metric insights.
///
/// Errors are values: the public entry points of the engine never return
/// them directly but attach them to a best-effort result, so the enum is
/// cloneable and serializable alongside the result it annotates.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InsightError {
    /// Fewer samples than the operation requires.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Values and timestamps differ in length.
    #[error("Length mismatch: {values} values but {timestamps} timestamps")]
    LengthMismatch { values: usize, timestamps: usize },

    /// NaN or infinite input value.
    #[error("Non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    /// Timestamp not strictly after its predecessor.
    #[error("Timestamps not strictly ascending at index {index}")]
    UnorderedTimestamps { index: usize },

    /// Numerical computation produced an unusable value.
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl InsightError {
    /// Shorthand for [`InsightError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for metric insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let error = InsightError::InsufficientData {
            required: 14,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 14 points, got 3"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = InsightError::invalid_parameter("seasonal_period", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'seasonal_period': must be positive"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = InsightError::LengthMismatch {
            values: 10,
            timestamps: 9,
        };
        assert_eq!(
            error.to_string(),
            "Length mismatch: 10 values but 9 timestamps"
        );
    }

    #[test]
    fn test_non_finite_display() {
        let error = InsightError::NonFiniteValue { index: 4 };
        assert_eq!(error.to_string(), "Non-finite value at index 4");
    }

    #[test]
    fn test_unordered_timestamps_display() {
        let error = InsightError::UnorderedTimestamps { index: 2 };
        assert_eq!(
            error.to_string(),
            "Timestamps not strictly ascending at index 2"
        );
    }

    #[test]
    fn test_numerical_error_display() {
        let error = InsightError::NumericalError("variance overflow".to_string());
        assert_eq!(error.to_string(), "Numerical error: variance overflow");
    }

    #[test]
    fn test_error_round_trips_through_json() {
        let error = InsightError::InsufficientData {
            required: 7,
            actual: 2,
        };
        let json = serde_json::to_string(&error).unwrap();
        let back: InsightError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, error);
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(InsightError::NumericalError("test".to_string()));
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InsightError>();
    }
}
