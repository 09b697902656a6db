//! Shared numeric helpers.
//!
//! Population statistics (divide by N) and ordinary least squares, with
//! explicit guards so that degenerate inputs yield zero instead of NaN.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; zero for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// `component / (component + residual)` clamped to `[0, 1]`, zero when both are zero.
pub fn variance_share(component_variance: f64, residual_variance: f64) -> f64 {
    let total = component_variance + residual_variance;
    if total > 0.0 {
        (component_variance / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Elapsed days of each timestamp since the first one.
pub fn elapsed_days(timestamps: &[DateTime<Utc>]) -> Vec<f64> {
    let Some(&origin) = timestamps.first() else {
        return Vec::new();
    };
    timestamps
        .iter()
        .map(|t| (*t - origin).num_milliseconds() as f64 / MILLIS_PER_DAY)
        .collect()
}

/// Ordinary least squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, in `[0, 1]`
    pub r_squared: f64,
}

impl LinearFit {
    /// Predicted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a line through `(xs[i], ys[i])`.
///
/// Fewer than two points, or no spread in `x`, gives a flat line through
/// the mean. A constant `y` gives `r_squared = 0`; spread is measured
/// against the rounding noise of the mean, so small-scale data still fits.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> LinearFit {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    if n < 2 || sxx <= rounding_floor(mean_x, n) {
        return LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
        };
    }

    let sxy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if ss_tot > rounding_floor(mean_y, n) {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Sum of squares indistinguishable from zero for `n` samples around `mean`.
fn rounding_floor(mean: f64, n: usize) -> f64 {
    f64::EPSILON * mean * mean * n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), 5.0);
        assert_eq!(variance(&data), 4.0);
        assert_eq!(std_dev(&data), 2.0);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn test_variance_share() {
        assert_eq!(variance_share(3.0, 1.0), 0.75);
        assert_eq!(variance_share(0.0, 0.0), 0.0);
        assert_eq!(variance_share(0.0, 5.0), 0.0);
        assert_eq!(variance_share(5.0, 0.0), 1.0);
    }

    #[test]
    fn test_elapsed_days() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let ts = vec![start, start + Duration::hours(12), start + Duration::days(3)];
        assert_eq!(elapsed_days(&ts), vec![0.0, 0.5, 3.0]);
        assert!(elapsed_days(&[]).is_empty());
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 7.0).collect();
        let fit = linear_fit(&xs, &ys);
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert!((fit.intercept - 7.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_fit_constant_series() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [5.0; 4];
        let fit = linear_fit(&xs, &ys);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 0.0);
        assert_eq!(fit.intercept, 5.0);
    }

    #[test]
    fn test_linear_fit_small_scale_line() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 1e-7 * x).collect();
        let fit = linear_fit(&xs, &ys);
        assert!((fit.slope - 1e-7).abs() < 1e-15);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_fit_constant_fraction() {
        let xs = [0.0, 1.0, 2.0];
        let fit = linear_fit(&xs, &[0.1; 3]);
        assert_eq!(fit.r_squared, 0.0);
        assert!(fit.slope.abs() < 1e-15);
    }

    #[test]
    fn test_linear_fit_single_point() {
        let fit = linear_fit(&[0.0], &[4.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 4.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn test_linear_fit_noisy_r_squared_in_range() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x + if *x as usize % 2 == 0 { 3.0 } else { -3.0 }).collect();
        let fit = linear_fit(&xs, &ys);
        assert!(fit.slope > 0.0);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }
}
