use crate::StatsError;

/// Checks that the sample is non-empty and that every observation is finite.
pub(crate) fn validate(sample: &[f64]) -> Result<(), StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if let Some(idx) = sample.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::invalid(format!(
            "observation at index {idx} is not finite ({})",
            sample[idx]
        )));
    }
    Ok(())
}

/// Returns a validated, ascending copy of the sample.
pub(crate) fn sorted(sample: &[f64]) -> Result<Vec<f64>, StatsError> {
    validate(sample)?;
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Observations beyond this magnitude are rescaled before summing, so that
/// sums and squares stay finite.
const SCALE_THRESHOLD: f64 = 1e100;

/// Divisor applied to every observation before accumulating.
fn scale(sample: &[f64]) -> f64 {
    let max = sample.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
    if max > SCALE_THRESHOLD { max } else { 1.0 }
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn mean(sample: &[f64]) -> f64 {
    let scale = scale(sample);
    sample.iter().map(|v| v / scale).sum::<f64>() / sample.len() as f64 * scale
}

/// Sample standard deviation with the `n - 1` denominator. Zero for a single
/// observation.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn std_dev(sample: &[f64], mean: f64) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let scale = scale(sample);
    let squares = sample
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum::<f64>();
    (squares / (sample.len() - 1) as f64).sqrt() * scale
}
