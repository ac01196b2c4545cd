//! Run the statistics engine on an arbitrary sample

use std::{
    fs::File,
    io::{self, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::Utc;
use ratatui::widgets::Block;

use crate::{
    schema::report::{DescribeReport, TailReport},
    util::{self, Output},
    view::{
        self,
        widgets::{BoxPlotDisplay, HistogramDisplay},
    },
};

const CHART_WIDTH: u16 = 72;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Sample file: one number per line, or a CSV file with `--column` (`-` for stdin)
    file: PathBuf,
    /// Read the sample from this column of a CSV file
    #[arg(long)]
    column: Option<String>,
    /// Percentiles to report (comma-separated, 0-100)
    #[arg(long, value_delimiter = ',', default_values_t = [5.0, 25.0, 50.0, 75.0, 95.0])]
    percentiles: Vec<f64>,
    /// Run a one-sample t-test against this mean
    #[arg(long)]
    null_mean: Option<f64>,
    /// Report the probability of exceeding this value
    #[arg(long)]
    threshold: Option<f64>,
    /// Number of histogram bins
    #[arg(long, default_value_t = 10)]
    bins: usize,
    /// Draw the histogram and box plot
    #[arg(long)]
    plot: bool,
    /// Write a JSON report to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let text = read_input(&arg.file)?;
    let sample = match &arg.column {
        Some(column) => parse_csv_column(&text, column),
        None => parse_sample_text(&text),
    }
    .with_context(|| format!("Failed to read sample from {}", arg.file.display()))?;
    tracing::info!(observations = sample.len(), "loaded sample");

    let report = analyze(&sample, arg)?;
    if !util::json_to_stdout(arg.output.as_deref()) {
        print_report(&report, &sample);
        if arg.plot {
            print_charts(&report);
        }
    }
    if let Some(path) = &arg.output {
        Output::save_json(&report, path)?;
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read sample from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .with_context(|| format!("Failed to read sample file: {}", path.display()))?;
    }
    Ok(text)
}

/// Parses one observation per line, skipping blank lines and `#` comments.
fn parse_sample_text(text: &str) -> anyhow::Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            line.parse::<f64>()
                .with_context(|| format!("line {line_no}: {line:?} is not a number"))
        })
        .collect()
}

fn parse_csv_column(text: &str, column: &str) -> anyhow::Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let idx = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .with_context(|| format!("no column named {column:?}"))?;
    reader
        .records()
        .enumerate()
        .map(|(row, record)| {
            let record = record?;
            let cell = record.get(idx).unwrap_or_default();
            cell.parse::<f64>().with_context(|| {
                format!("data row {}: {cell:?} in column {column:?} is not a number", row + 1)
            })
        })
        .collect()
}

fn analyze(sample: &[f64], arg: &DescribeArg) -> anyhow::Result<DescribeReport> {
    let statistics = statlab_stats::describe_with_percentiles(sample, &arg.percentiles)?;
    let hypothesis_test = arg
        .null_mean
        .map(|mean| statlab_stats::one_sample_t_test(sample, mean))
        .transpose()
        .context("Failed to run the hypothesis test")?;
    let tail = arg
        .threshold
        .map(|threshold| TailReport::compute(sample, threshold))
        .transpose()?;

    Ok(DescribeReport {
        generated_at: Utc::now(),
        source: arg.file.clone(),
        column: arg.column.clone(),
        statistics,
        outliers: statlab_stats::detect_outliers(sample)?,
        box_plot: statlab_stats::box_plot(sample)?,
        histogram: statlab_stats::histogram(sample, arg.bins)?,
        hypothesis_test,
        tail,
    })
}

fn print_report(report: &DescribeReport, sample: &[f64]) {
    let stats = &report.statistics;
    match &report.column {
        Some(column) => println!("Sample: {} [{column}]", report.source.display()),
        None => println!("Sample: {}", report.source.display()),
    }
    println!("==========================================\n");

    println!("  Count:  {:10}", stats.count);
    println!("  Mean:   {:10.4}", stats.mean);
    println!("  Median: {:10.4}", stats.median);
    println!("  StdDev: {:10.4}", stats.std_dev);
    println!("  Min:    {:10.4}", stats.min);
    println!("  Max:    {:10.4}", stats.max);
    for (p, value) in stats.percentiles.iter() {
        println!("  P{p:<5}: {value:10.4}");
    }
    println!();

    let outliers = &report.outliers;
    println!(
        "Outliers (outside [{:.4}, {:.4}]): {} of {}",
        outliers.lower_fence,
        outliers.upper_fence,
        outliers.outliers.len(),
        sample.len()
    );
    if !outliers.outliers.is_empty() {
        println!("{}", util::format_values(&outliers.outliers, 8));
    }

    if let Some(test) = &report.hypothesis_test {
        println!();
        println!("One-sample t-test (H0: mean = {}):", test.hypothesized_mean);
        println!("  t-statistic: {:10.4}", test.t_statistic);
        println!("  p-value:     {:10.4}", test.p_value);
        println!("  df:          {:10}", test.degrees_of_freedom);
    }

    if let Some(tail) = &report.tail {
        println!();
        println!("P(X > {}):", tail.threshold);
        println!("  Normal model: {:10.4}", tail.model_probability);
        println!("  Observed:     {:10.4}", tail.empirical_probability);
    }
}

fn print_charts(report: &DescribeReport) {
    println!();
    let histogram =
        HistogramDisplay::new(&report.histogram).block(Block::bordered().title("Histogram"));
    let height = histogram.height();
    print!("{}", view::render_to_string(histogram, CHART_WIDTH, height));

    let box_plot =
        BoxPlotDisplay::new(&report.box_plot).block(Block::bordered().title("Box Plot"));
    let height = box_plot.height();
    print!("{}", view::render_to_string(box_plot, CHART_WIDTH, height));
}
