//! Statistics engine for the statlab exercises.
//!
//! Every operation is a pure function over a sample of `f64` observations:
//! no I/O, no shared state, and randomness only through an explicit
//! [`SampleSeed`]. Results are plain serializable data for a presentation
//! layer to render.
//!
//! - **Descriptive statistics**: mean, median, sample standard deviation, min, max
//! - **Percentiles**: linear interpolation between closest ranks
//! - **Outliers**: 1.5×IQR fences and box-plot summaries
//! - **Histogram**: equal-width binning
//! - **Sampling**: seeded draws without replacement
//! - **Hypothesis testing**: two-sided one-sample t-test
//! - **Normal model**: tail probabilities under a fitted normal distribution
//!
//! # Examples
//!
//! ```
//! use statlab_stats::{describe, detect_outliers, percentile};
//!
//! let heights = [150.0, 160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 400.0];
//!
//! let stats = describe(&heights).unwrap();
//! assert_eq!(stats.median, 175.0);
//! assert_eq!(percentile(&heights, 25.0).unwrap(), 165.0);
//!
//! let report = detect_outliers(&heights).unwrap();
//! assert_eq!(report.outliers, vec![400.0]);
//! ```
//!
//! ```
//! use statlab_stats::{SampleSeed, one_sample_t_test, random_sample, tail_probability};
//!
//! let heights = [168.2, 171.9, 165.4, 180.3, 175.0, 169.1, 172.6, 163.8, 177.4, 170.0];
//!
//! let subset = random_sample(&heights, 5, SampleSeed::from(2024)).unwrap();
//! assert_eq!(subset.len(), 5);
//!
//! let test = one_sample_t_test(&heights, 170.0).unwrap();
//! assert!(!test.is_significant(0.05));
//!
//! let p = tail_probability(&heights, 180.0).unwrap();
//! assert!((0.0..=1.0).contains(&p));
//! ```

pub mod descriptive;
pub mod error;
pub mod histogram;
pub mod hypothesis;
pub mod normal;
pub mod outliers;
pub mod percentiles;
mod sample;
pub mod sampling;

pub use self::{
    descriptive::{SummaryStatistics, describe, describe_with_percentiles},
    error::StatsError,
    histogram::{Histogram, HistogramBin, histogram},
    hypothesis::{HypothesisTestResult, one_sample_t_test},
    normal::{NormalFit, empirical_exceedance, tail_probability},
    outliers::{BoxPlotSummary, OutlierReport, box_plot, detect_outliers},
    percentiles::{Percentiles, percentile},
    sampling::{SampleSeed, random_sample},
};

/// Relative tolerance used when comparing computed floating-point values.
pub const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Absolute tolerance used when both values are close to zero.
const ABSOLUTE_TOLERANCE: f64 = 1e-12;

/// Compares two values with a relative tolerance of [`RELATIVE_TOLERANCE`].
///
/// ```
/// use statlab_stats::approx_eq;
///
/// assert!(approx_eq(170.0, 170.000_1));
/// assert!(!approx_eq(170.0, 170.01));
/// assert!(approx_eq(0.0, 1e-13));
/// ```
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= ABSOLUTE_TOLERANCE || diff <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}
