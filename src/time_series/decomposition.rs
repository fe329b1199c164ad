//! Classical seasonal decomposition
//!
//! Splits an observed series into trend, seasonal, and residual
//! components. The trend is a centered moving average spanning one
//! period; the seasonal component is the per-phase average of the
//! detrended series, normalized over one period; the residual is what
//! remains. Boundary positions where the centered window does not fit
//! are NA in trend and residual, never zero.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::PriceSeries;

/// How components combine to reproduce the observed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecompositionModel {
    /// `observed = trend * seasonal * residual`, for series whose
    /// seasonal swing scales with the level
    Multiplicative,
    /// `observed = trend + seasonal + residual`
    Additive,
}

/// Decomposition components aligned one-to-one with the observed series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompositionResult {
    pub model: DecompositionModel,
    pub period: usize,
    pub observed: Vec<f64>,
    /// Centered moving average; NA within `period / 2` of either boundary
    pub trend: Vec<NA<f64>>,
    /// Per-phase indices tiled across the series. Multiplicative indices
    /// average to 1.0, additive offsets to 0.0.
    pub seasonal: Vec<f64>,
    /// NA wherever trend is NA
    pub residual: Vec<NA<f64>>,
}

impl DecompositionResult {
    /// The `period` distinct seasonal values, phase 0 first
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal[..self.period]
    }
}

/// Decompose a series' prices at a fixed seasonal period
pub fn decompose(
    series: &PriceSeries,
    period: usize,
    model: DecompositionModel,
) -> Result<DecompositionResult> {
    decompose_values(series.prices(), period, model)
}

/// Classical decomposition of raw values at a fixed period.
///
/// Needs at least two full periods of data so every phase has a defined
/// detrended value to average.
pub fn decompose_values(
    values: &[f64],
    period: usize,
    model: DecompositionModel,
) -> Result<DecompositionResult> {
    if period < 2 {
        return Err(Error::InvalidInput(format!(
            "seasonal period must be at least 2, got {}",
            period
        )));
    }
    if values.len() < 2 * period {
        return Err(Error::InsufficientData {
            required: 2 * period,
            actual: values.len(),
        });
    }

    let trend = centered_moving_average(values, period);

    // Per-phase averages of the detrended series
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, t) in trend.iter().enumerate() {
        if let NA::Value(t) = t {
            let detrended = match model {
                DecompositionModel::Multiplicative => values[i] / t,
                DecompositionModel::Additive => values[i] - t,
            };
            sums[i % period] += detrended;
            counts[i % period] += 1;
        }
    }
    let mut indices: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| sum / count as f64)
        .collect();

    // Normalize so the period indices average to exactly 1 (or 0 for
    // additive), keeping the seasonal component free of level bias
    let grand_mean = indices.iter().sum::<f64>() / period as f64;
    match model {
        DecompositionModel::Multiplicative => {
            if grand_mean.abs() < f64::EPSILON {
                return Err(Error::Computation(
                    "seasonal indices average to zero; multiplicative model not applicable".into(),
                ));
            }
            for index in &mut indices {
                *index /= grand_mean;
            }
        }
        DecompositionModel::Additive => {
            for index in &mut indices {
                *index -= grand_mean;
            }
        }
    }

    let seasonal: Vec<f64> = (0..values.len()).map(|i| indices[i % period]).collect();

    let residual: Vec<NA<f64>> = trend
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let observed = NA::Value(values[i]);
            let s = NA::Value(seasonal[i]);
            match model {
                DecompositionModel::Multiplicative => observed / (t * s),
                DecompositionModel::Additive => observed - t - s,
            }
        })
        .collect();

    Ok(DecompositionResult {
        model,
        period,
        observed: values.to_vec(),
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average spanning one period.
///
/// An even period has no single center position, so two simple averages
/// offset by one position are averaged, which gives half weight to the
/// two end points of the stretched window.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<NA<f64>> {
    let n = values.len();
    let half = period / 2;
    let mut trend = vec![NA::NA; n];

    if period % 2 == 0 {
        for i in half..n - half {
            let interior: f64 = values[i - half + 1..i + half].iter().sum();
            let ends = 0.5 * (values[i - half] + values[i + half]);
            trend[i] = NA::Value((interior + ends) / period as f64);
        }
    } else {
        for i in half..n - half {
            let sum: f64 = values[i - half..=i + half].iter().sum();
            trend[i] = NA::Value(sum / period as f64);
        }
    }

    trend
}
