// Descriptive statistics implementations

use crate::error::{Error, Result};
use crate::na::NA;
use crate::stats::{CorrelationMatrix, Histogram, SummaryStats};

pub(crate) fn describe_impl(data: &[f64]) -> Result<SummaryStats> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "summary statistics require at least one observation".into(),
        ));
    }

    let count = data.len();
    let mean = data.iter().sum::<f64>() / count as f64;

    // Sample variance; a single observation has no spread
    let variance = if count > 1 {
        data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64
    } else {
        0.0
    };
    let std = variance.sqrt();

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(SummaryStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Quantile by linear interpolation over sorted data
fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    sorted_data[idx_floor] * (1.0 - weight_ceil) + sorted_data[idx_ceil] * weight_ceil
}

/// Pearson correlation over the positions where both sides are defined.
/// NA when fewer than two positions overlap or either side has zero
/// variance over the overlap.
pub(crate) fn pairwise_correlation(x: &[NA<f64>], y: &[NA<f64>]) -> NA<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (NA::Value(a), NA::Value(b)) => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return NA::NA;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let numerator: f64 = pairs
        .iter()
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    let var_x: f64 = pairs.iter().map(|(a, _)| (a - mean_x).powi(2)).sum();
    let var_y: f64 = pairs.iter().map(|(_, b)| (b - mean_y).powi(2)).sum();

    let denominator = (var_x * var_y).sqrt();
    if denominator.abs() < f64::EPSILON {
        return NA::NA;
    }

    NA::Value(numerator / denominator)
}

pub(crate) fn correlation_matrix_impl(
    features: &[(&str, &[NA<f64>])],
) -> Result<CorrelationMatrix> {
    if features.is_empty() {
        return Err(Error::EmptyData(
            "correlation matrix requires at least one feature".into(),
        ));
    }

    let len = features[0].1.len();
    for (_, column) in features {
        if column.len() != len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: column.len(),
            });
        }
    }

    let n = features.len();
    let mut values = vec![vec![NA::NA; n]; n];
    for i in 0..n {
        values[i][i] = NA::Value(1.0);
        for j in (i + 1)..n {
            let r = pairwise_correlation(features[i].1, features[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    let names = features.iter().map(|(name, _)| name.to_string()).collect();
    Ok(CorrelationMatrix::from_parts(names, values))
}

pub(crate) fn histogram_impl(data: &[f64], bins: usize) -> Result<Histogram> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "histogram requires at least one observation".into(),
        ));
    }
    if bins == 0 {
        return Err(Error::InvalidInput(
            "histogram requires at least one bin".into(),
        ));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
    }
    // Constant data gets a unit-wide range centered on the value
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|k| min + k as f64 * width).collect();

    let mut counts = vec![0usize; bins];
    for &v in data {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}
