//! Exercise 2: heart-disease exploration

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use ratatui::widgets::Block;
use statlab_data::{
    DataError,
    heart::{HeartDiseaseDataset, Sex},
};

use crate::{
    schema::report::{ColumnReport, HeartReport},
    util::{self, Output},
    view::{
        self,
        widgets::{BoxPlotDisplay, FrequencyDisplay, HistogramDisplay},
    },
};

const CHART_WIDTH: u16 = 72;
const FREQUENCY_CHART_HEIGHT: u16 = 14;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HeartArg {
    /// Path to the heart-disease CSV file
    csv: PathBuf,
    /// Number of bins in the age histogram
    #[arg(long, default_value_t = 10)]
    bins: usize,
    /// Draw the age histogram, heart-rate box plots and angina bar chart
    #[arg(long)]
    plot: bool,
    /// Write a JSON report to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HeartArg) -> anyhow::Result<()> {
    let dataset = HeartDiseaseDataset::load(&arg.csv)
        .with_context(|| format!("Failed to load heart-disease data: {}", arg.csv.display()))?;
    let report = analyze(&dataset, arg)?;
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

fn analyze(dataset: &HeartDiseaseDataset, arg: &HeartArg) -> anyhow::Result<HeartReport> {
    let disease_by_sex = match dataset.disease_by_sex() {
        Ok(by_sex) => Some(by_sex),
        Err(DataError::NoCases) => {
            tracing::warn!("no patient has heart disease, skipping the comparison by sex");
            None
        }
        Err(e) => return Err(e.into()),
    };
    let cholesterol_by_group = dataset.mean_cholesterol_by_group()?;

    let ages = dataset.ages_with_disease()?;
    let ages_with_disease = summarize_column(&ages, arg.bins, "age of patients with disease")?;

    let heart_rate = dataset.max_heart_rate_by_disease()?;
    let max_heart_rate_without_disease = summarize_column(
        &heart_rate.without_disease,
        arg.bins,
        "maximum heart rate without disease",
    )?;
    let max_heart_rate_with_disease = summarize_column(
        &heart_rate.with_disease,
        arg.bins,
        "maximum heart rate with disease",
    )?;

    let angina_frequency = dataset.angina_frequency()?;

    Ok(HeartReport {
        generated_at: Utc::now(),
        source: arg.csv.clone(),
        num_records: dataset.len(),
        disease_by_sex,
        cholesterol_by_group,
        ages_with_disease,
        max_heart_rate_without_disease,
        max_heart_rate_with_disease,
        angina_frequency,
    })
}

/// Summarizes one charted column; a group without observations is skipped.
fn summarize_column(
    sample: &[f64],
    num_bins: usize,
    label: &str,
) -> anyhow::Result<Option<ColumnReport>> {
    if sample.is_empty() {
        tracing::warn!(column = label, "no observations, skipping");
        return Ok(None);
    }
    let report = ColumnReport::compute(sample, num_bins)
        .with_context(|| format!("Failed to summarize {label}"))?;
    Ok(Some(report))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn print_report(report: &HeartReport) {
    println!("Heart Disease Analysis ({})", report.source.display());
    println!("==========================================\n");
    println!("Records: {}\n", report.num_records);

    match &report.disease_by_sex {
        Some(by_sex) => {
            println!(
                "{} suffer more from heart disease by {:.2}%.",
                capitalize(by_sex.more_affected.plural()),
                by_sex.percentage_difference
            );
            println!(
                "  ({} {} and {} {} with heart disease)\n",
                by_sex.men_with_disease,
                Sex::Male.plural(),
                by_sex.women_with_disease,
                Sex::Female.plural()
            );
        }
        None => println!("No patient has heart disease.\n"),
    }

    println!("Average Serum Cholesterol by Sex and Disease:");
    println!("  {:<8} {:<8} {:>8} {:>12}", "Sex", "Disease", "Patients", "Mean mg/dl");
    println!("  {}", "-".repeat(39));
    for group in &report.cholesterol_by_group {
        println!(
            "  {:<8} {:<8} {:>8} {:>12.2}",
            group.sex.to_string(),
            group.disease,
            group.count,
            group.mean
        );
    }
    println!();

    println!("Summary of Charted Columns:");
    println!(
        "  {:<32} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Column", "Count", "Mean", "Median", "StdDev", "Min", "Max"
    );
    println!("  {}", "-".repeat(84));
    for (label, column) in [
        ("Age (with disease)", report.ages_with_disease.as_ref()),
        (
            "Max heart rate (no disease)",
            report.max_heart_rate_without_disease.as_ref(),
        ),
        (
            "Max heart rate (disease)",
            report.max_heart_rate_with_disease.as_ref(),
        ),
    ] {
        let Some(column) = column else {
            println!("  {label:<32} {:>6}", 0);
            continue;
        };
        let stats = &column.statistics;
        println!(
            "  {:<32} {:>6} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            label, stats.count, stats.mean, stats.median, stats.std_dev, stats.min, stats.max
        );
    }
    println!();

    println!("Exercise Induced Angina by Disease:");
    println!("  {:<12} {:>12} {:>12}", "Angina", "No Disease", "Disease");
    println!("  {}", "-".repeat(38));
    for row in &report.angina_frequency {
        println!(
            "  {:<12} {:>12} {:>12}",
            row.category, row.without_disease, row.with_disease
        );
    }
}

fn print_charts(report: &HeartReport) {
    println!();
    if let Some(ages) = &report.ages_with_disease {
        let histogram = HistogramDisplay::new(&ages.histogram)
            .block(Block::bordered().title("Age Distribution of Patients with Heart Disease"));
        let height = histogram.height();
        print!("{}", view::render_to_string(histogram, CHART_WIDTH, height));
    }

    for (title, column) in [
        (
            "Maximum Heart Rate (bpm), No Disease",
            &report.max_heart_rate_without_disease,
        ),
        (
            "Maximum Heart Rate (bpm), Disease",
            &report.max_heart_rate_with_disease,
        ),
    ] {
        let Some(column) = column else {
            println!("{title}: no observations");
            continue;
        };
        let box_plot = BoxPlotDisplay::new(&column.box_plot).block(Block::bordered().title(title));
        let height = box_plot.height();
        print!("{}", view::render_to_string(box_plot, CHART_WIDTH, height));
    }

    let frequency = FrequencyDisplay::new(&report.angina_frequency)
        .block(Block::bordered().title("Exercise Induced Angina (no / yes disease)"));
    let width = frequency.width().max(CHART_WIDTH / 2);
    print!(
        "{}",
        view::render_to_string(frequency, width, FREQUENCY_CHART_HEIGHT)
    );
}
