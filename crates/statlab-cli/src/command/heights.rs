//! Exercise 1: simulated heights
//!
//! Generates a normal height dataset and runs the full engine over it:
//! descriptive statistics, quartiles, outliers, a random sub-sample, a
//! one-sample t-test, and the probability of exceeding a height threshold.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::Rng as _;
use ratatui::widgets::Block;
use statlab_data::height::HeightSimulation;
use statlab_stats::SampleSeed;

use crate::{
    schema::report::{HeightsReport, SignificanceReport, TailReport},
    util::{self, Output},
    view::{
        self,
        widgets::{BoxPlotDisplay, HistogramDisplay},
    },
};

const CHART_WIDTH: u16 = 72;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HeightsArg {
    /// Number of heights to simulate
    #[arg(long, default_value_t = 1000)]
    size: usize,
    /// Mean height of the simulated population (cm)
    #[arg(long, default_value_t = 170.0)]
    mean: f64,
    /// Standard deviation of the simulated population (cm)
    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
    /// Random seed; a fresh one is drawn and reported when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Number of heights drawn without replacement for the random sample
    #[arg(long, default_value_t = 50)]
    sample_size: usize,
    /// Population mean under the null hypothesis (cm)
    #[arg(long, default_value_t = 170.0)]
    null_mean: f64,
    /// Height threshold for the exceedance probability (cm)
    #[arg(long, default_value_t = 180.0)]
    threshold: f64,
    /// Significance level of the hypothesis test
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    /// Number of histogram bins
    #[arg(long, default_value_t = 8)]
    bins: usize,
    /// Draw the histogram and box plot
    #[arg(long)]
    plot: bool,
    /// Write a JSON report to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HeightsArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "simulating heights");

    let report = analyze(arg, seed)?;
    if !util::json_to_stdout(arg.output.as_deref()) {
        print_report(&report);
        if arg.plot {
            print_charts(&report);
        }
    }
    if let Some(path) = &arg.output {
        Output::save_json(&report, path)?;
    }
    Ok(())
}

fn analyze(arg: &HeightsArg, seed: u64) -> anyhow::Result<HeightsReport> {
    if !(arg.alpha > 0.0 && arg.alpha < 1.0) {
        anyhow::bail!("alpha must lie strictly between 0 and 1, got {}", arg.alpha);
    }

    let simulation = HeightSimulation {
        size: arg.size,
        mean: arg.mean,
        std_dev: arg.std_dev,
    };
    let mut rng = SampleSeed::from(seed).rng();
    let data_seed = rng.random::<SampleSeed>();
    let sampling_seed = rng.random::<SampleSeed>();

    let heights = simulation
        .generate(data_seed)
        .context("Failed to simulate heights")?;
    let statistics = statlab_stats::describe(&heights)?;
    let outliers = statlab_stats::detect_outliers(&heights)?;
    let box_plot = statlab_stats::box_plot(&heights)?;
    let histogram = statlab_stats::histogram(&heights, arg.bins)?;
    let random_sample = statlab_stats::random_sample(&heights, arg.sample_size, sampling_seed)
        .context("Failed to draw the random sample")?;
    let test = statlab_stats::one_sample_t_test(&heights, arg.null_mean)
        .context("Failed to run the hypothesis test")?;
    let tail = TailReport::compute(&heights, arg.threshold)?;
    tracing::debug!(
        outliers = outliers.outliers.len(),
        t = test.t_statistic,
        p = test.p_value,
        "analyzed heights"
    );

    Ok(HeightsReport {
        generated_at: Utc::now(),
        seed,
        simulation,
        statistics,
        outliers,
        box_plot,
        histogram,
        random_sample,
        hypothesis_test: SignificanceReport::new(test, arg.alpha),
        tail,
    })
}

fn print_report(report: &HeightsReport) {
    let stats = &report.statistics;
    let simulation = &report.simulation;

    println!("Height Analysis (seed={})", report.seed);
    println!("==========================================\n");
    println!(
        "Simulated {} heights from N({:.1}, {:.1})\n",
        simulation.size, simulation.mean, simulation.std_dev
    );

    println!("Statistics:");
    println!("  Mean:               {:10.2}", stats.mean);
    println!("  Standard deviation: {:10.2}", stats.std_dev);
    println!("  Median:             {:10.2}", stats.median);
    println!("  Min:                {:10.2}", stats.min);
    println!("  Max:                {:10.2}", stats.max);
    println!();

    println!("Percentiles:");
    for (p, value) in stats.percentiles.iter() {
        println!("  P{p:02.0}:                {value:10.2}");
    }
    println!();

    let outliers = &report.outliers;
    println!(
        "Outliers (outside [{:.2}, {:.2}], IQR {:.2}):",
        outliers.lower_fence, outliers.upper_fence, outliers.iqr
    );
    if outliers.outliers.is_empty() {
        println!("  none");
    } else {
        let mut sorted = outliers.outliers.clone();
        sorted.sort_by(f64::total_cmp);
        println!("{}", util::format_values(&sorted, 8));
    }
    println!();

    println!("Random Sample ({} heights):", report.random_sample.len());
    println!("{}", util::format_values(&report.random_sample, 8));
    println!();

    let test = &report.hypothesis_test;
    println!(
        "Hypothesis Test (H0: mean = {:.1}):",
        test.test.hypothesized_mean
    );
    println!("  t-statistic:        {:10.4}", test.test.t_statistic);
    println!("  p-value:            {:10.4}", test.test.p_value);
    println!(
        "  Result:             {} at alpha = {}",
        if test.significant {
            "reject H0"
        } else {
            "fail to reject H0"
        },
        test.alpha
    );
    println!();

    let tail = &report.tail;
    println!("Probability of Exceeding {:.1} cm:", tail.threshold);
    println!("  Normal model:       {:10.4}", tail.model_probability);
    println!("  Observed:           {:10.4}", tail.empirical_probability);
}

fn print_charts(report: &HeightsReport) {
    println!();
    let histogram = HistogramDisplay::new(&report.histogram)
        .block(Block::bordered().title("Histogram of Height [cm]"));
    let height = histogram.height();
    print!("{}", view::render_to_string(histogram, CHART_WIDTH, height));

    let box_plot = BoxPlotDisplay::new(&report.box_plot)
        .block(Block::bordered().title("Box Plot of Height [cm]"));
    let height = box_plot.height();
    print!("{}", view::render_to_string(box_plot, CHART_WIDTH, height));
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Default for HeightsArg {
        fn default() -> Self {
            let simulation = HeightSimulation::default();
            Self {
                size: simulation.size,
                mean: simulation.mean,
                std_dev: simulation.std_dev,
                seed: None,
                sample_size: 50,
                null_mean: 170.0,
                threshold: 180.0,
                alpha: 0.05,
                bins: 8,
                plot: false,
                output: None,
            }
        }
    }

    #[derive(Debug, clap::Parser)]
    struct Cli {
        #[command(flatten)]
        arg: HeightsArg,
    }

    #[test]
    fn test_command_line_defaults() {
        use clap::Parser as _;

        let Cli { arg } = Cli::try_parse_from(["heights"]).unwrap();
        let default = HeightsArg::default();
        assert_eq!(arg.size, default.size);
        assert_eq!(arg.mean, default.mean);
        assert_eq!(arg.std_dev, default.std_dev);
        assert_eq!(arg.sample_size, default.sample_size);
        assert_eq!(arg.null_mean, default.null_mean);
        assert_eq!(arg.threshold, default.threshold);
        assert_eq!(arg.bins, default.bins);
        assert_eq!(arg.seed, None);

        let Cli { arg } =
            Cli::try_parse_from(["heights", "--seed", "7", "--std-dev", "5.5", "--plot"]).unwrap();
        assert_eq!(arg.seed, Some(7));
        assert_eq!(arg.std_dev, 5.5);
        assert!(arg.plot);
    }

    #[test]
    fn test_analysis_is_reproducible() {
        let arg = HeightsArg::default();
        let first = analyze(&arg, 42).unwrap();
        let second = analyze(&arg, 42).unwrap();
        assert_eq!(first.statistics, second.statistics);
        assert_eq!(first.random_sample, second.random_sample);

        assert_eq!(first.random_sample.len(), 50);
        assert_eq!(first.histogram.total_count(), 1000);
        assert_eq!(first.statistics.percentiles.as_slice().len(), 3);
        assert!((first.statistics.mean - 170.0).abs() < 3.0);
        assert!((0.0..=1.0).contains(&first.tail.model_probability));
    }

    #[test]
    fn test_dash_output_yields_a_single_json_document() {
        use clap::Parser as _;

        let Cli { arg } =
            Cli::try_parse_from(["heights", "--seed", "3", "--output", "-", "--plot"]).unwrap();
        assert!(util::json_to_stdout(arg.output.as_deref()));

        let report = analyze(&arg, 3).unwrap();
        let bytes = serde_json::to_vec_pretty(&report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["seed"], 3);
        assert_eq!(value["random_sample"].as_array().unwrap().len(), 50);
        assert!(value["statistics"]["mean"].is_f64());
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let too_large_sample = HeightsArg {
            size: 20,
            ..HeightsArg::default()
        };
        assert!(analyze(&too_large_sample, 1).is_err());

        let bad_alpha = HeightsArg {
            alpha: 1.5,
            ..HeightsArg::default()
        };
        assert!(analyze(&bad_alpha, 1).is_err());

        let bad_std_dev = HeightsArg {
            std_dev: -1.0,
            ..HeightsArg::default()
        };
        assert!(analyze(&bad_std_dev, 1).is_err());
    }
}
