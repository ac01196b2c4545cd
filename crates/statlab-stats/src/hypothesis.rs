use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::{StatsError, sample};

/// Outcome of a one-sample t-test.
///
/// Whether the result is significant depends on a threshold supplied by the
/// caller; see [`Self::is_significant`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    pub t_statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub sample_mean: f64,
    pub hypothesized_mean: f64,
}

impl HypothesisTestResult {
    /// Returns `true` if the null hypothesis is rejected at level `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Two-sided one-sample Student t-test against `hypothesized_mean`.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if the sample holds a single
///   observation, has zero variance, or `hypothesized_mean` is not finite
///
/// # Examples
///
/// ```
/// use statlab_stats::one_sample_t_test;
///
/// let result = one_sample_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
/// assert_eq!(result.t_statistic, 0.0);
/// assert!((result.p_value - 1.0).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn one_sample_t_test(
    sample: &[f64],
    hypothesized_mean: f64,
) -> Result<HypothesisTestResult, StatsError> {
    sample::validate(sample)?;
    if !hypothesized_mean.is_finite() {
        return Err(StatsError::invalid(format!(
            "hypothesized mean must be finite, got {hypothesized_mean}"
        )));
    }
    if sample.len() < 2 {
        return Err(StatsError::invalid(
            "t-test needs at least two observations (variance is undefined for one)",
        ));
    }

    let n = sample.len() as f64;
    let mean = sample::mean(sample);
    let std_dev = sample::std_dev(sample, mean);
    if std_dev <= 0.0 {
        return Err(StatsError::invalid(
            "t-test is undefined for a sample with zero variance",
        ));
    }

    let standard_error = std_dev / n.sqrt();
    let t_statistic = (mean - hypothesized_mean) / standard_error;
    let degrees_of_freedom = n - 1.0;
    let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| StatsError::invalid(format!("cannot build t-distribution: {e}")))?;
    let p_value = (2.0 * t_dist.sf(t_statistic.abs())).clamp(0.0, 1.0);

    Ok(HypothesisTestResult {
        t_statistic,
        p_value,
        degrees_of_freedom,
        sample_mean: mean,
        hypothesized_mean,
    })
}
