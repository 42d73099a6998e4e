//! Sample statistics that resolve degenerate inputs to zero

/// Arithmetic mean, 0 for an empty sample set.
///
/// Finite inputs always give a finite mean: when the plain sum overflows,
/// each value is divided by the count before summing.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Population standard deviation, 0 for an empty sample set.
///
/// Squared deviations that overflow are recomputed on values scaled into
/// `[-1, 1]`, so finite inputs give a finite result.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let deviation = population_std_dev(values);
    if deviation.is_finite() {
        return deviation;
    }

    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return deviation;
    }
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    population_std_dev(&scaled) * scale
}

fn population_std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values.iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// `numerator / denominator`, or 0 when the denominator is 0. A quotient too
/// large for `f64` saturates at `±f64::MAX`.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    (numerator / denominator).clamp(-f64::MAX, f64::MAX)
}
