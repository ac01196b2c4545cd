//! Normal-model fitting and tail probabilities.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, Normal};

use crate::{StatsError, sample};

/// Normal distribution fitted to a sample by its mean and sample standard
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalFit {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalFit {
    /// Fits a normal model to `sample`.
    ///
    /// # Errors
    ///
    /// * [`StatsError::EmptyInput`] - if `sample` is empty
    /// * [`StatsError::InvalidArgument`] - if an observation is not finite
    pub fn from_sample(sample: &[f64]) -> Result<Self, StatsError> {
        sample::validate(sample)?;
        let mean = sample::mean(sample);
        let std_dev = sample::std_dev(sample, mean);
        Ok(Self { mean, std_dev })
    }

    /// P(X > threshold) under this model.
    ///
    /// A fit without spread is a point mass at the mean, so the probability
    /// is 1 below the mean and 0 at or above it.
    #[must_use]
    pub fn tail_probability(&self, threshold: f64) -> f64 {
        match Normal::new(self.mean, self.std_dev) {
            Ok(normal) => normal.sf(threshold).clamp(0.0, 1.0),
            Err(_) => {
                if threshold < self.mean {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Probability of exceeding `threshold` under a normal model fitted to `sample`.
///
/// This is a model estimate, not the observed proportion; see
/// [`empirical_exceedance`] for the latter.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if `threshold` is NaN or an observation
///   is not finite
///
/// # Examples
///
/// ```
/// use statlab_stats::tail_probability;
///
/// let heights = [160.0, 170.0, 180.0];
/// // The fitted mean is 170, so half the mass lies above it.
/// let p = tail_probability(&heights, 170.0).unwrap();
/// assert!((p - 0.5).abs() < 1e-9);
/// ```
pub fn tail_probability(sample: &[f64], threshold: f64) -> Result<f64, StatsError> {
    if threshold.is_nan() {
        return Err(StatsError::invalid("threshold must not be NaN"));
    }
    Ok(NormalFit::from_sample(sample)?.tail_probability(threshold))
}

/// Fraction of observations strictly greater than `threshold`.
///
/// # Errors
///
/// Same as [`tail_probability`].
#[expect(clippy::cast_precision_loss)]
pub fn empirical_exceedance(sample: &[f64], threshold: f64) -> Result<f64, StatsError> {
    if threshold.is_nan() {
        return Err(StatsError::invalid("threshold must not be NaN"));
    }
    sample::validate(sample)?;
    let above = sample.iter().filter(|&&v| v > threshold).count();
    Ok(above as f64 / sample.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHTS_WITH_OUTLIER: [f64; 9] = [
        150.0, 160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 400.0,
    ];

    #[test]
    fn test_matches_normal_survival_function() {
        let fit = NormalFit {
            mean: 170.0,
            std_dev: 10.0,
        };
        // One standard deviation above the mean.
        assert!((fit.tail_probability(180.0) - 0.158_655_253_9).abs() < 1e-8);
    }

    #[test]
    fn test_uses_fitted_model_not_empirical_share() {
        let model = tail_probability(&HEIGHTS_WITH_OUTLIER, 180.0).unwrap();
        let observed = empirical_exceedance(&HEIGHTS_WITH_OUTLIER, 180.0).unwrap();
        assert!((model - 0.588_423_695_5).abs() < 1e-6);
        assert!((observed - 3.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let mut previous = 1.0;
        for step in -200..=200 {
            let threshold = 170.0 + f64::from(step);
            let p = tail_probability(&HEIGHTS_WITH_OUTLIER, threshold).unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert!(p <= previous, "threshold {threshold}: {p} > {previous}");
            previous = p;
        }
    }

    #[test]
    fn test_infinite_thresholds() {
        assert_eq!(tail_probability(&[1.0, 2.0], f64::INFINITY), Ok(0.0));
        assert_eq!(tail_probability(&[1.0, 2.0], f64::NEG_INFINITY), Ok(1.0));
    }

    #[test]
    fn test_point_mass_is_a_step() {
        assert_eq!(tail_probability(&[5.0, 5.0], 4.9), Ok(1.0));
        assert_eq!(tail_probability(&[5.0, 5.0], 5.0), Ok(0.0));
        assert_eq!(tail_probability(&[5.0], 6.0), Ok(0.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(tail_probability(&[], 1.0), Err(StatsError::EmptyInput));
        assert!(tail_probability(&[1.0], f64::NAN).is_err());
        assert_eq!(empirical_exceedance(&[], 1.0), Err(StatsError::EmptyInput));
    }
}
