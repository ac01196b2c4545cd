//! JSON report documents written by `--output`

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use statlab_data::{
    heart::{DiseaseBySex, FrequencyRow, GroupMean},
    height::HeightSimulation,
};
use statlab_stats::{
    BoxPlotSummary, Histogram, HypothesisTestResult, NormalFit, OutlierReport, StatsError,
    SummaryStatistics,
};

#[derive(Debug, Clone, Serialize)]
pub struct HeightsReport {
    pub generated_at: DateTime<Utc>,
    /// Seed passed to (or chosen by) the `heights` command.
    pub seed: u64,
    pub simulation: HeightSimulation,
    pub statistics: SummaryStatistics,
    pub outliers: OutlierReport,
    pub box_plot: BoxPlotSummary,
    pub histogram: Histogram,
    pub random_sample: Vec<f64>,
    pub hypothesis_test: SignificanceReport,
    pub tail: TailReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignificanceReport {
    #[serde(flatten)]
    pub test: HypothesisTestResult,
    pub alpha: f64,
    pub significant: bool,
}

impl SignificanceReport {
    pub fn new(test: HypothesisTestResult, alpha: f64) -> Self {
        let significant = test.is_significant(alpha);
        Self {
            test,
            alpha,
            significant,
        }
    }
}

/// Probability of exceeding a threshold, under the fitted normal model and
/// as observed.
#[derive(Debug, Clone, Serialize)]
pub struct TailReport {
    pub threshold: f64,
    pub fit: NormalFit,
    pub model_probability: f64,
    pub empirical_probability: f64,
}

impl TailReport {
    pub fn compute(sample: &[f64], threshold: f64) -> Result<Self, StatsError> {
        let fit = NormalFit::from_sample(sample)?;
        Ok(Self {
            threshold,
            fit,
            model_probability: fit.tail_probability(threshold),
            empirical_probability: statlab_stats::empirical_exceedance(sample, threshold)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeartReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub num_records: usize,
    /// `None` when no patient has the disease.
    pub disease_by_sex: Option<DiseaseBySex>,
    pub cholesterol_by_group: Vec<GroupMean>,
    /// Charted columns are `None` when their group has no observations.
    pub ages_with_disease: Option<ColumnReport>,
    pub max_heart_rate_without_disease: Option<ColumnReport>,
    pub max_heart_rate_with_disease: Option<ColumnReport>,
    pub angina_frequency: Vec<FrequencyRow>,
}

/// Summary of one charted axis.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub statistics: SummaryStatistics,
    pub box_plot: BoxPlotSummary,
    pub histogram: Histogram,
}

impl ColumnReport {
    pub fn compute(sample: &[f64], num_bins: usize) -> Result<Self, StatsError> {
        Ok(Self {
            statistics: statlab_stats::describe(sample)?,
            box_plot: statlab_stats::box_plot(sample)?,
            histogram: statlab_stats::histogram(sample, num_bins)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub statistics: SummaryStatistics,
    pub outliers: OutlierReport,
    pub box_plot: BoxPlotSummary,
    pub histogram: Histogram,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis_test: Option<HypothesisTestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<TailReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTLIER_SAMPLE: [f64; 9] = [
        150.0, 160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 400.0,
    ];

    #[test]
    fn test_tail_report_combines_model_and_observed() {
        let tail = TailReport::compute(&OUTLIER_SAMPLE, 180.0).unwrap();
        assert!((tail.model_probability - 0.588_423_695_5).abs() < 1e-6);
        assert!((tail.empirical_probability - 3.0 / 9.0).abs() < 1e-12);
        assert!((tail.fit.mean - 197.222_222_222).abs() < 1e-6);
    }

    #[test]
    fn test_significance_report_flattens_test() {
        let test = statlab_stats::one_sample_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
        let report = SignificanceReport::new(test, 0.05);
        assert!(!report.significant);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["t_statistic"], 0.0);
        assert!((json["p_value"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(json["significant"], false);
    }

    #[test]
    fn test_column_report_uses_requested_bins() {
        let report = ColumnReport::compute(&OUTLIER_SAMPLE, 4).unwrap();
        assert_eq!(report.histogram.bins.len(), 4);
        assert_eq!(report.histogram.total_count(), 9);
        assert_eq!(report.box_plot.outliers, vec![400.0]);
        assert_eq!(report.statistics.median, 175.0);
    }
}
