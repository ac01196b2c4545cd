use serde::Serialize;

use crate::{StatsError, approx_eq, sample};

/// Quartile points computed by default alongside descriptive statistics.
pub const QUARTILES: [f64; 3] = [25.0, 50.0, 75.0];

/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs in the order they were
/// requested, for lookup of commonly used percentile points.
///
/// # Examples
///
/// ```
/// use statlab_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]).unwrap();
///
/// assert_eq!(percentiles.get(50.0), Some(3.0));
/// assert_eq!(percentiles.get(25.0), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Percentiles {
    /// Each tuple contains (percentile, value) where percentile is 0.0-100.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from unsorted values.
    ///
    /// # Errors
    ///
    /// * [`StatsError::EmptyInput`] - if `values` is empty
    /// * [`StatsError::InvalidArgument`] - if a point lies outside `[0, 100]`
    ///   or an observation is not finite
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Result<Self, StatsError> {
        let sorted = sample::sorted(values)?;
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Computes percentiles from values already sorted in ascending order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Result<Self, StatsError> {
        sample::validate(sorted_values)?;
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| {
                validate_point(p)?;
                Ok((p, interpolate_sorted(sorted_values, p)))
            })
            .collect::<Result<_, StatsError>>()?;
        Ok(Self { values })
    }

    /// Gets the value at a specific percentile.
    ///
    /// Points are matched with [`approx_eq`]. Returns `None` if the percentile
    /// was not precomputed.
    ///
    /// ```
    /// use statlab_stats::percentiles::Percentiles;
    ///
    /// let percentiles = Percentiles::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[50.0, 95.0]).unwrap();
    /// assert_eq!(percentiles.get(50.0), Some(3.0));
    /// assert_eq!(percentiles.get(25.0), None); // Not precomputed
    /// ```
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values
            .iter()
            .find_map(|&(p, value)| approx_eq(p, percentile).then_some(value))
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Computes a single percentile of an unsorted sample.
///
/// Uses linear interpolation between the two closest ranks: for `n` values the
/// percentile `p` sits at fractional rank `p / 100 * (n - 1)`.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if `p` is outside `[0, 100]` or an
///   observation is not finite
///
/// # Examples
///
/// ```
/// use statlab_stats::percentile;
///
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 50.0).unwrap(), 3.0);
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0).unwrap(), 2.5);
/// assert!(percentile(&[1.0, 2.0], 101.0).is_err());
/// ```
pub fn percentile(sample: &[f64], p: f64) -> Result<f64, StatsError> {
    validate_point(p)?;
    let sorted = sample::sorted(sample)?;
    Ok(interpolate_sorted(&sorted, p))
}

pub(crate) fn validate_point(p: f64) -> Result<(), StatsError> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(StatsError::invalid(format!(
            "percentile must be within [0, 100], got {p}"
        )))
    }
}

/// Computes a percentile from sorted data by linear interpolation.
///
/// Returns `f64::NAN` if the input is empty. `percentile` is assumed to be in
/// `[0, 100]`.
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn interpolate_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let rank = percentile / 100.0 * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);
    let (lower, upper) = (sorted_values[lo], sorted_values[hi]);
    let fraction = rank - lo as f64;
    // Weighted sum rather than `upper - lower`, which overflows for
    // observations of opposite sign near `f64::MAX`.
    (lower * (1.0 - fraction) + upper * fraction).clamp(lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHTS_WITH_OUTLIER: [f64; 9] = [
        150.0, 160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 400.0,
    ];

    #[test]
    fn test_median_of_odd_sample() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 50.0), Ok(3.0));
    }

    #[test]
    fn test_quartiles_of_outlier_sample() {
        let percentiles = Percentiles::new(&HEIGHTS_WITH_OUTLIER, &QUARTILES).unwrap();
        assert_eq!(percentiles.get(25.0), Some(165.0));
        assert_eq!(percentiles.get(50.0), Some(175.0));
        assert_eq!(percentiles.get(75.0), Some(185.0));
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(percentile(&values, 10.0).unwrap(), 1.3));
        assert!(approx_eq(percentile(&values, 25.0).unwrap(), 1.75));
        assert!(approx_eq(percentile(&values, 90.0).unwrap(), 3.7));
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let values = [7.0, -3.0, 12.5, 0.0];
        assert_eq!(percentile(&values, 0.0), Ok(-3.0));
        assert_eq!(percentile(&values, 100.0), Ok(12.5));
    }

    #[test]
    fn test_single_observation() {
        assert_eq!(percentile(&[4.2], 0.0), Ok(4.2));
        assert_eq!(percentile(&[4.2], 63.0), Ok(4.2));
        assert_eq!(percentile(&[4.2], 100.0), Ok(4.2));
    }

    #[test]
    fn test_every_percentile_within_range() {
        let values = [3.1, 9.7, -2.4, 5.5, 5.5, 0.3, 8.8, 1.0, 4.4, 7.2, 6.6];
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for step in 0..=1000 {
            let p = f64::from(step) / 10.0;
            let value = percentile(&values, p).unwrap();
            assert!(min <= value && value <= max, "P{p} = {value}");
        }
    }

    #[test]
    fn test_percentile_is_monotone_in_p() {
        let values = [10.0, 4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=100 {
            let value = percentile(&values, f64::from(step)).unwrap();
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_rejects_out_of_range_points() {
        for p in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            let err = percentile(&[1.0, 2.0], p).unwrap_err();
            assert!(matches!(err, StatsError::InvalidArgument { .. }), "p = {p}");
        }
        assert!(Percentiles::new(&[1.0, 2.0], &[50.0, 150.0]).is_err());
    }

    #[test]
    fn test_rejects_empty_sample() {
        assert_eq!(percentile(&[], 50.0), Err(StatsError::EmptyInput));
        assert_eq!(
            Percentiles::new(&[], &QUARTILES),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_lookup_preserves_request_order() {
        let percentiles = Percentiles::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[90.0, 10.0]).unwrap();
        let points = percentiles.iter().map(|(p, _)| p).collect::<Vec<_>>();
        assert_eq!(points, vec![90.0, 10.0]);
    }

    #[test]
    fn test_interpolate_sorted_empty_is_nan() {
        assert!(interpolate_sorted(&[], 50.0).is_nan());
    }

    #[test]
    fn test_extreme_magnitudes_interpolate_without_overflow() {
        let values = [1e308, -1e308];
        assert_eq!(percentile(&values, 50.0), Ok(0.0));
        assert!(approx_eq(percentile(&values, 25.0).unwrap(), -5e307));
        assert!(approx_eq(percentile(&values, 75.0).unwrap(), 5e307));
    }

    #[test]
    fn test_from_sorted_rejects_non_finite() {
        assert!(matches!(
            Percentiles::from_sorted(&[1.0, f64::NAN], &QUARTILES),
            Err(StatsError::InvalidArgument { .. })
        ));
        assert_eq!(
            Percentiles::from_sorted(&[], &QUARTILES),
            Err(StatsError::EmptyInput)
        );
    }
}
