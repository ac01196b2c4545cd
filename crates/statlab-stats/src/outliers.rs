//! Outlier classification with Tukey's 1.5×IQR fences, and the box-plot
//! summary built on the same fences.

use serde::Serialize;

use crate::{StatsError, percentiles, sample};

/// Multiplier applied to the interquartile range to place the fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// Fences and flagged observations of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`
    pub lower_fence: f64,
    /// `q3 + 1.5 * iqr`
    pub upper_fence: f64,
    /// Observations strictly outside the fences, in their original order.
    pub outliers: Vec<f64>,
}

impl OutlierReport {
    /// Returns `true` if `value` lies strictly outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }

    fn fences_from_sorted(sorted_values: &[f64]) -> (f64, f64, f64, f64, f64) {
        let q1 = percentiles::interpolate_sorted(sorted_values, 25.0);
        let q3 = percentiles::interpolate_sorted(sorted_values, 75.0);
        let iqr = q3 - q1;
        (
            q1,
            q3,
            iqr,
            q1 - FENCE_FACTOR * iqr,
            q3 + FENCE_FACTOR * iqr,
        )
    }
}

/// Classifies observations under the 1.5×IQR rule.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] - if `sample` is empty
/// * [`StatsError::InvalidArgument`] - if an observation is not finite
///
/// # Examples
///
/// ```
/// use statlab_stats::detect_outliers;
///
/// let heights = [150.0, 160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 400.0];
/// let report = detect_outliers(&heights).unwrap();
/// assert_eq!(report.iqr, 20.0);
/// assert_eq!(report.upper_fence, 215.0);
/// assert_eq!(report.outliers, vec![400.0]);
/// ```
pub fn detect_outliers(sample: &[f64]) -> Result<OutlierReport, StatsError> {
    let sorted = sample::sorted(sample)?;
    let (q1, q3, iqr, lower_fence, upper_fence) = OutlierReport::fences_from_sorted(&sorted);
    let mut report = OutlierReport {
        q1,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        outliers: vec![],
    };
    report.outliers = sample
        .iter()
        .copied()
        .filter(|&v| report.is_outlier(v))
        .collect();
    Ok(report)
}

/// Five-number summary drawn by a box plot.
///
/// Whiskers extend to the most extreme observations that still lie within the
/// fences; anything beyond them is listed in `outliers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

/// Computes the box-plot summary of a sample.
///
/// # Errors
///
/// Same as [`detect_outliers`].
///
/// # Examples
///
/// ```
/// use statlab_stats::box_plot;
///
/// let summary = box_plot(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
/// assert_eq!(summary.upper_whisker, 5.0);
/// assert_eq!(summary.outliers, vec![100.0]);
/// ```
pub fn box_plot(sample: &[f64]) -> Result<BoxPlotSummary, StatsError> {
    let sorted = sample::sorted(sample)?;
    let (q1, q3, _iqr, lower_fence, upper_fence) = OutlierReport::fences_from_sorted(&sorted);
    let within = |v: &f64| (lower_fence..=upper_fence).contains(v);

    // The observation nearest each quartile always lies within the fences.
    let lower_whisker = sorted.iter().copied().find(within).unwrap_or(q1);
    let upper_whisker = sorted.iter().copied().rev().find(within).unwrap_or(q3);
    let outliers = sorted.iter().copied().filter(|v| !within(v)).collect();

    Ok(BoxPlotSummary {
        lower_whisker,
        q1,
        median: percentiles::interpolate_sorted(&sorted, 50.0),
        q3,
        upper_whisker,
        outliers,
    })
}
