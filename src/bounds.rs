//! Statistical bound estimation from reference samples.
//!
//! Bounds are Student-t confidence limits around the reference sample
//! mean. Distance metrics get one-sided bounds on the "worse" side of
//! the mean; execution times get two-sided intervals. The dispersion
//! estimate switches to a range-based estimator for very small samples,
//! where the sample standard deviation is unreliable.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::dataset::MetricDirection;

/// Dean-Dixon range-to-sigma coefficients for n = 2..=10.
const RANGE_COEFFICIENTS: [f64; 9] = [
    0.8862, 0.5908, 0.4857, 0.4299, 0.3946, 0.3698, 0.3512, 0.3367, 0.3249,
];

/// One-sided confidence bounds around a reference mean for a distance
/// metric.
///
/// The warn bound is always strictly farther from the mean than the
/// match bound: it is the 99% confidence limit where the match bound is
/// the 95% one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// 95% confidence limit: values inside it classify as `Match`.
    pub match_bound: f64,
    /// 99% confidence limit: values inside it classify as `Warn` at worst.
    pub warn_bound: f64,
}

/// Two-sided confidence intervals around a reference mean execution time.
///
/// The match interval is nested inside the warn interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBounds {
    /// Lower 95% confidence limit.
    pub match_low: f64,
    /// Upper 95% confidence limit.
    pub match_high: f64,
    /// Lower 99% confidence limit.
    pub warn_low: f64,
    /// Upper 99% confidence limit.
    pub warn_high: f64,
}

impl TimeBounds {
    /// The `(low, high)` match interval.
    pub fn match_interval(&self) -> (f64, f64) {
        (self.match_low, self.match_high)
    }

    /// The `(low, high)` warn interval.
    pub fn warn_interval(&self) -> (f64, f64) {
        (self.warn_low, self.warn_high)
    }
}

fn sample_mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Estimate the dispersion of a reference sample set.
///
/// For n > 10 this is the unbiased sample standard deviation. For
/// 2 <= n <= 10 it is the sample range scaled by the Dean-Dixon
/// coefficient for n, which resists outliers in very small samples.
/// Returns `None` for n < 2, where no dispersion estimate is defined.
pub fn dispersion(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    if n > 10 {
        let m = sample_mean(samples);
        let variance = samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64;
        return Some(variance.sqrt());
    }
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    Some((max - min) * RANGE_COEFFICIENTS[n - 2])
}

fn t_quantile(p: f64, df: f64) -> f64 {
    // Valid for any df >= 1, which the n >= 2 guards ensure.
    StudentsT::new(0.0, 1.0, df).unwrap().inverse_cdf(p)
}

/// Compute match and warn bounds for a distance-metric pipeline from its
/// reference samples.
///
/// The bounds sit at `mean + sign * (sigma / sqrt(n)) * t(p, n - 1)` with
/// p = 0.95 (match) and p = 0.99 (warn), on the "worse" side of the mean
/// given `direction`. Returns `None` for fewer than two samples.
pub fn distance_bounds(samples: &[f64], direction: MetricDirection) -> Option<Bounds> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let m = sample_mean(samples);
    let se = dispersion(samples)? / (n as f64).sqrt();
    let sign = match direction {
        MetricDirection::LowerIsBetter => 1.0,
        MetricDirection::HigherIsBetter => -1.0,
    };
    let df = (n - 1) as f64;
    Some(Bounds {
        match_bound: m + sign * se * t_quantile(0.95, df),
        warn_bound: m + sign * se * t_quantile(0.99, df),
    })
}

/// Compute two-sided match and warn intervals for execution times from
/// the reference samples.
///
/// The intervals sit at `mean -/+ (sigma / sqrt(n)) * t(1 - alpha/2, n - 1)`
/// with alpha = 0.05 (match) and alpha = 0.01 (warn). Returns `None` for
/// fewer than two samples.
pub fn exec_time_bounds(samples: &[f64]) -> Option<TimeBounds> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let m = sample_mean(samples);
    let se = dispersion(samples)? / (n as f64).sqrt();
    let df = (n - 1) as f64;
    let match_half = se * t_quantile(1.0 - 0.05 / 2.0, df);
    let warn_half = se * t_quantile(1.0 - 0.01 / 2.0, df);
    Some(TimeBounds {
        match_low: m - match_half,
        match_high: m + match_half,
        warn_low: m - warn_half,
        warn_high: m + warn_half,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn dispersion_undefined_below_two_samples() {
        assert_eq!(dispersion(&[]), None);
        assert_eq!(dispersion(&[1.0]), None);
    }

    #[test]
    fn dispersion_uses_range_coefficients_for_small_n() {
        // n = 2: range 1.0, coefficient 0.8862.
        assert!(close(dispersion(&[1.0, 2.0]).unwrap(), 0.8862, 1e-12));
        // n = 5: range 0.3, coefficient 0.4299.
        let sigma = dispersion(&[1.0, 1.2, 1.1, 1.3, 1.05]).unwrap();
        assert!(close(sigma, 0.3 * 0.4299, 1e-12));
        // n = 10 still uses the table.
        let samples: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert!(close(dispersion(&samples).unwrap(), 9.0 * 0.3249, 1e-12));
    }

    #[test]
    fn dispersion_uses_sample_stddev_above_ten() {
        let samples: Vec<f64> = (1..=12).map(|i| i as f64).collect();
        // Sum of squared deviations from the mean 6.5 is 143.5.
        let expected = (143.5_f64 / 11.0).sqrt();
        assert!(close(dispersion(&samples).unwrap(), expected, 1e-12));
    }

    #[test]
    fn distance_bounds_for_small_reference_sample() {
        let samples = [1.0, 1.2, 1.1, 1.3, 1.05];
        let bounds = distance_bounds(&samples, MetricDirection::LowerIsBetter).unwrap();
        assert!(close(bounds.match_bound, 1.253, 1e-3));
        assert!(close(bounds.warn_bound, 1.346, 1e-3));
    }

    #[test]
    fn warn_bound_farther_from_mean_than_match_bound() {
        let samples = [4.2, 4.9, 4.4, 4.6, 4.1, 4.8, 4.3];
        let m = samples.iter().sum::<f64>() / samples.len() as f64;
        for direction in [MetricDirection::LowerIsBetter, MetricDirection::HigherIsBetter] {
            let bounds = distance_bounds(&samples, direction).unwrap();
            assert!((bounds.warn_bound - m).abs() > (bounds.match_bound - m).abs());
        }
    }

    #[test]
    fn higher_is_better_bounds_sit_below_the_mean() {
        let samples = [0.90, 0.95, 0.92, 0.93];
        let m = samples.iter().sum::<f64>() / samples.len() as f64;
        let bounds = distance_bounds(&samples, MetricDirection::HigherIsBetter).unwrap();
        assert!(bounds.match_bound < m);
        assert!(bounds.warn_bound < bounds.match_bound);
    }

    #[test]
    fn exec_time_match_interval_nested_in_warn_interval() {
        let samples = [10.0, 11.0, 10.5, 10.2, 10.8];
        let bounds = exec_time_bounds(&samples).unwrap();
        assert!(bounds.warn_low < bounds.match_low);
        assert!(bounds.match_low < bounds.match_high);
        assert!(bounds.match_high < bounds.warn_high);
        // Interval is centred on the mean.
        let m = 10.5;
        assert!(close(bounds.match_low + bounds.match_high, 2.0 * m, 1e-9));
    }

    #[test]
    fn bounds_undefined_below_two_samples() {
        assert!(distance_bounds(&[1.0], MetricDirection::LowerIsBetter).is_none());
        assert!(exec_time_bounds(&[]).is_none());
    }
}
