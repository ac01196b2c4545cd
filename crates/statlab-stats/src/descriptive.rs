use serde::Serialize;

use crate::{
    StatsError,
    percentiles::{self, Percentiles, QUARTILES},
    sample,
};

/// Descriptive statistics summarizing a sample.
///
/// This structure contains common measures of central tendency and dispersion
/// together with a requested set of percentiles. It is derived from a single
/// snapshot of the sample and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// The number of observations.
    pub count: usize,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The median (50th percentile, interpolated for even sizes).
    pub median: f64,
    /// The sample variance (`n - 1` denominator). May overflow to infinity for
    /// observations beyond about 1e154 even though `std_dev` is finite.
    pub variance: f64,
    /// The sample standard deviation (`n - 1` denominator).
    pub std_dev: f64,
    /// The requested percentile values.
    pub percentiles: Percentiles,
}

impl SummaryStatistics {
    /// Computes summary statistics from values already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Result<Self, StatsError> {
        let percentiles = Percentiles::from_sorted(sorted_values, percentile_points)?;
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Err(StatsError::EmptyInput);
        };
        let mean = sample::mean(sorted_values);
        let median = percentiles::interpolate_sorted(sorted_values, 50.0);
        let std_dev = sample::std_dev(sorted_values, mean);

        Ok(Self {
            count: sorted_values.len(),
            min,
            max,
            mean,
            median,
            variance: std_dev * std_dev,
            std_dev,
            percentiles,
        })
    }

    /// Difference between the largest and smallest observations.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Computes mean, median, standard deviation, min, max and quartiles.
///
/// A single observation yields a standard deviation of zero.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if an observation is not finite
///
/// # Examples
///
/// ```
/// use statlab_stats::describe;
///
/// let stats = describe(&[5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
/// assert_eq!(stats.min, 1.0);
/// assert_eq!(stats.max, 5.0);
/// assert_eq!(stats.mean, 3.0);
/// assert_eq!(stats.median, 3.0);
/// assert_eq!(stats.percentiles.get(75.0), Some(4.0));
/// ```
pub fn describe(sample: &[f64]) -> Result<SummaryStatistics, StatsError> {
    describe_with_percentiles(sample, &QUARTILES)
}

/// Like [`describe`], but with a caller-chosen set of percentile points.
///
/// # Errors
///
/// In addition to the errors of [`describe`], fails with
/// [`StatsError::InvalidArgument`] if a point lies outside `[0, 100]`.
pub fn describe_with_percentiles(
    sample: &[f64],
    percentile_points: &[f64],
) -> Result<SummaryStatistics, StatsError> {
    let sorted = sample::sorted(sample)?;
    SummaryStatistics::from_sorted(&sorted, percentile_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, percentile};

    #[test]
    fn test_describe_simple_sample() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert!(approx_eq(stats.variance, 2.5));
        assert!(approx_eq(stats.std_dev, 2.5_f64.sqrt()));
        assert_eq!(stats.range(), 4.0);
    }

    #[test]
    fn test_even_sample_median_is_interpolated() {
        let stats = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_median_matches_fiftieth_percentile() {
        let values = [12.0, 3.5, 8.25, 19.0, 1.0, 7.75, 11.5, 2.0];
        let stats = describe(&values).unwrap();
        assert!(approx_eq(stats.median, percentile(&values, 50.0).unwrap()));
        assert!(stats.min <= stats.median && stats.median <= stats.max);
    }

    #[test]
    fn test_single_observation_has_zero_spread() {
        let stats = describe(&[170.0]).unwrap();
        assert_eq!(stats.min, 170.0);
        assert_eq!(stats.max, 170.0);
        assert_eq!(stats.median, 170.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_custom_percentiles() {
        let stats = describe_with_percentiles(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.0, 100.0]).unwrap();
        assert_eq!(stats.percentiles.as_slice(), &[(0.0, 1.0), (100.0, 5.0)]);
    }

    #[test]
    fn test_describe_errors() {
        assert_eq!(describe(&[]), Err(StatsError::EmptyInput));
        assert!(describe(&[1.0, f64::INFINITY]).is_err());
        assert!(describe_with_percentiles(&[1.0], &[-5.0]).is_err());
    }

    #[test]
    fn test_serializes_percentiles_as_pairs() {
        let stats = describe(&[1.0, 2.0, 3.0]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["percentiles"][1], serde_json::json!([50.0, 2.0]));
    }

    #[test]
    fn test_extreme_magnitudes_keep_finite_spread() {
        let stats = describe(&[1e308, -1e308]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert!(stats.std_dev.is_finite());
        assert!(approx_eq(stats.std_dev, 2.0_f64.sqrt() * 1e308));
    }

    #[test]
    fn test_from_sorted_rejects_nan_without_panicking() {
        assert!(matches!(
            SummaryStatistics::from_sorted(&[f64::NAN, 1.0], &QUARTILES),
            Err(StatsError::InvalidArgument { .. })
        ));
    }
}
