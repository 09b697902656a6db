//! Seasonal adjustment and pattern extrapolation on top of a decomposition.

use insight_spi::DecompositionResult;

/// `original[i] - seasonal[i]` for every point.
pub fn adjust_for_seasonality(decomposition: &DecompositionResult) -> Vec<f64> {
    decomposition
        .original
        .iter()
        .zip(&decomposition.seasonal)
        .map(|(value, seasonal)| value - seasonal)
        .collect()
}

/// Forecast `periods_ahead` values as the last trend level plus the
/// seasonal value at the matching position of the last full cycle.
///
/// A series shorter than one cycle has no full cycle to draw from and is
/// extrapolated flat at the last trend level. An empty series yields an
/// empty forecast.
pub fn predict_seasonal_pattern(
    decomposition: &DecompositionResult,
    seasonal_period: usize,
    periods_ahead: usize,
) -> Vec<f64> {
    let Some(&level) = decomposition.trend.last() else {
        return Vec::new();
    };
    let n = decomposition.seasonal.len();
    let last_cycle = if seasonal_period > 0 && n >= seasonal_period {
        &decomposition.seasonal[n - seasonal_period..]
    } else {
        &[]
    };

    (0..periods_ahead)
        .map(|i| {
            if last_cycle.is_empty() {
                level
            } else {
                level + last_cycle[i % seasonal_period]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::decompose;
    use crate::stats::variance;

    #[test]
    fn test_adjustment_removes_seasonal() {
        let data: Vec<f64> = (0..30).map(|i| 50.0 + [3.0, 0.0, -3.0][i % 3]).collect();
        let result = decompose(&data, 3, 6);
        let adjusted = adjust_for_seasonality(&result);
        for i in 0..data.len() {
            assert!((adjusted[i] - (data[i] - result.seasonal[i])).abs() < 1e-12);
        }
        assert!(variance(&adjusted) < 0.1 * variance(&data));
    }

    #[test]
    fn test_adjustment_of_degraded_is_identity() {
        let data = [1.0, 2.0, 3.0];
        let result = decompose(&data, 7, 14);
        assert_eq!(adjust_for_seasonality(&result), data.to_vec());
    }

    #[test]
    fn test_prediction_continues_cycle() {
        let data: Vec<f64> = (0..30).map(|i| 10.0 + [3.0, 0.0, -3.0][i % 3]).collect();
        let result = decompose(&data, 3, 6);
        let forecast = predict_seasonal_pattern(&result, 3, 6);
        let level = *result.trend.last().unwrap();
        assert_eq!(forecast.len(), 6);
        // 30 points: next phase is 30 % 3 == 0
        assert!((forecast[0] - (level + result.seasonal[27])).abs() < 1e-12);
        assert!((forecast[1] - (level + result.seasonal[28])).abs() < 1e-12);
        assert!((forecast[3] - forecast[0]).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_of_degraded_is_flat() {
        let result = decompose(&[4.0, 6.0], 7, 14);
        assert_eq!(predict_seasonal_pattern(&result, 7, 3), vec![6.0; 3]);
    }

    #[test]
    fn test_prediction_of_empty_series() {
        let result = decompose(&[], 7, 14);
        assert!(predict_seasonal_pattern(&result, 7, 3).is_empty());
    }

    #[test]
    fn test_zero_horizon() {
        let result = decompose(&[1.0; 20], 4, 8);
        assert!(predict_seasonal_pattern(&result, 4, 0).is_empty());
    }
}
