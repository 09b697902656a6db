//! Property tests: decomposition invariants and anomaly threshold monotonicity.

use insight_facade::{decompose, detect_anomalies};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Metric-like values of moderate magnitude.
fn arb_values(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4..1.0e4f64, min..max)
}

fn arb_period() -> impl Strategy<Value = usize> {
    1usize..15
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn components_sum_to_original(values in arb_values(1, 120), period in arb_period()) {
        let result = decompose(&values, period, 0);
        prop_assert!(!result.degraded);
        prop_assert!(result.error.is_none());
        prop_assert_eq!(result.trend.len(), values.len());
        prop_assert_eq!(result.seasonal.len(), values.len());
        prop_assert_eq!(result.residual.len(), values.len());
        for i in 0..values.len() {
            let rebuilt = result.trend[i] + result.seasonal[i] + result.residual[i];
            prop_assert!((rebuilt - values[i]).abs() < 1e-9 * values[i].abs().max(1.0));
        }
    }

    #[test]
    fn seasonal_cycle_has_zero_mean(values in arb_values(30, 120), period in arb_period()) {
        let result = decompose(&values, period, 0);
        let cycle = &result.seasonal[..period];
        let mean = cycle.iter().sum::<f64>() / period as f64;
        prop_assert!(mean.abs() < 1e-6);
    }

    #[test]
    fn strengths_are_bounded(values in arb_values(0, 120), period in arb_period()) {
        let result = decompose(&values, period, 0);
        prop_assert!((0.0..=1.0).contains(&result.seasonal_strength));
        prop_assert!((0.0..=1.0).contains(&result.trend_strength));
    }

    #[test]
    fn degraded_below_minimum(values in arb_values(0, 40), period in arb_period(), extra in 1usize..10) {
        let result = decompose(&values, period, values.len() + extra);
        prop_assert!(result.degraded);
        prop_assert_eq!(&result.trend, &values);
        prop_assert!(result.seasonal.iter().all(|s| *s == 0.0));
        prop_assert!(result.residual.iter().all(|r| *r == 0.0));
    }

    #[test]
    fn raising_threshold_never_adds_anomalies(
        values in arb_values(0, 200),
        low in 0.0..4.0f64,
        delta in 0.0..4.0f64,
    ) {
        let at_low = detect_anomalies(&values, low);
        let at_high = detect_anomalies(&values, low + delta);
        prop_assert!(at_high.len() <= at_low.len());
        for point in &at_high {
            prop_assert!(at_low.iter().any(|p| p.index == point.index));
        }
    }

    #[test]
    fn flagged_points_exceed_threshold(values in arb_values(0, 200), threshold in 0.0..4.0f64) {
        let anomalies = detect_anomalies(&values, threshold);
        for window in anomalies.windows(2) {
            prop_assert!(window[0].index < window[1].index);
        }
        for point in &anomalies {
            prop_assert!(point.z_score > threshold);
            prop_assert_eq!(point.value, values[point.index]);
        }
    }
}
