use std::ops::Range;

use serde::Serialize;

use crate::{StatsError, sample};

/// A histogram representation of a sample's distribution.
///
/// The histogram divides `[min, max]` into equal-width bins and counts the
/// observations falling into each one. Every bin is half-open except the last,
/// which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.range.start, self.range.end)
    }
}

impl Histogram {
    /// Creates a histogram from pre-sorted values.
    ///
    /// Returns an empty histogram when there are no values or no bins. When
    /// every value is equal the bins span one unit centred on that value.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.5, 2.9, 4.0];
    /// let histogram = Histogram::from_sorted(&values, 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![1, 3, 1]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let (start, end) = if max - min > 0.0 {
            (min, max)
        } else {
            // Distribution is concentrated at a single value
            (min - 0.5, max + 0.5)
        };
        let bin_width = (end - start) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|idx| {
                // Recompute boundaries from the start to avoid accumulating error
                let bin_start = start + idx as f64 * bin_width;
                let bin_end = if idx + 1 == num_bins {
                    end.next_up()
                } else {
                    start + (idx + 1) as f64 * bin_width
                };
                HistogramBin {
                    range: bin_start..bin_end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let position = ((val - start) / bin_width).floor();
            let idx = (position.max(0.0) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of observations across all bins.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count, or zero for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Builds an equal-width histogram of an unsorted sample.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if `num_bins` is zero or an observation
///   is not finite
pub fn histogram(sample: &[f64], num_bins: usize) -> Result<Histogram, StatsError> {
    if num_bins == 0 {
        return Err(StatsError::invalid("histogram needs at least one bin"));
    }
    let sorted = sample::sorted(sample)?;
    Ok(Histogram::from_sorted(&sorted, num_bins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values = [
            170.2, 165.1, 181.9, 158.4, 172.0, 169.9, 190.3, 175.5, 160.0, 177.7,
        ];
        let histogram = histogram(&values, 8).unwrap();
        assert_eq!(histogram.bins.len(), 8);
        assert_eq!(histogram.total_count(), 10);
    }

    #[test]
    fn test_bins_cover_min_to_max() {
        let histogram = histogram(&[0.0, 10.0], 4).unwrap();
        assert_eq!(histogram.bins[0].range.start, 0.0);
        assert_eq!(histogram.bins[1].range, 2.5..5.0);
        assert!(histogram.bins[3].range.contains(&10.0));
        let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_boundary_value_goes_to_upper_bin() {
        let histogram = histogram(&[0.0, 5.0, 10.0], 2).unwrap();
        let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_constant_sample_uses_unit_span() {
        let histogram = histogram(&[3.0, 3.0, 3.0], 2).unwrap();
        assert_eq!(histogram.bins[0].range, 2.5..3.0);
        assert_eq!(histogram.total_count(), 3);
        assert_eq!(histogram.max_count(), 3);
        assert_eq!(histogram.bins[1].count, 3);
        assert_eq!(histogram.bins[0].midpoint(), 2.75);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            histogram(&[1.0], 0),
            Err(StatsError::InvalidArgument { .. })
        ));
        assert_eq!(histogram(&[], 5), Err(StatsError::EmptyInput));
        assert!(Histogram::from_sorted(&[], 5).bins.is_empty());
    }
}
