//! Autocorrelation and partial autocorrelation
//!
//! Sample ACF uses the full-sample mean and variance at every lag, so
//! `acf[0]` is exactly 1. PACF solves the Yule-Walker equations with the
//! Levinson-Durbin recursion and reports the reflection coefficient at
//! each order.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::PriceSeries;

/// ACF and PACF values at a single lag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationPoint {
    pub lag: usize,
    pub acf: f64,
    pub pacf: f64,
}

/// ACF and PACF over lags `0..=max_lag`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocorrelationProfile {
    pub max_lag: usize,
    pub points: Vec<AutocorrelationPoint>,
}

impl AutocorrelationProfile {
    pub fn point(&self, lag: usize) -> Option<&AutocorrelationPoint> {
        self.points.get(lag)
    }
}

/// Aligned `(value, value lag steps later)` pairs for lag scatter plots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LagPairs {
    pub lag: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Sample autocorrelation for lags `0..=max_lag`.
///
/// Covariances at every lag are normalized by the full sample length and
/// the full-sample variance, the convention correlogram plots use.
pub fn acf(values: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::EmptyData("cannot compute acf of empty data".into()));
    }
    let n = values.len();
    if max_lag >= n {
        return Err(Error::InvalidLag { max_lag, len: n });
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let var = centered.iter().map(|v| v * v).sum::<f64>() / n as f64;
    if var.abs() < 1e-10 {
        return Err(Error::Computation(
            "series has zero variance; autocorrelation is undefined".into(),
        ));
    }

    let mut autocorr = Vec::with_capacity(max_lag + 1);
    for lag in 0..=max_lag {
        let cov: f64 = centered
            .iter()
            .take(n - lag)
            .zip(centered.iter().skip(lag))
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n as f64;
        autocorr.push(cov / var);
    }
    Ok(autocorr)
}

/// Partial autocorrelation for lags `0..=max_lag`.
///
/// `pacf[0]` is 1 by convention and `pacf[1]` equals `acf[1]`.
pub fn pacf(values: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let autocorr = acf(values, max_lag)?;
    Ok(levinson_durbin(&autocorr))
}

/// Compute ACF and PACF together over a series' prices
pub fn profile(series: &PriceSeries, max_lag: usize) -> Result<AutocorrelationProfile> {
    let acf_values = acf(series.prices(), max_lag)?;
    let pacf_values = levinson_durbin(&acf_values);

    let points = acf_values
        .iter()
        .zip(&pacf_values)
        .enumerate()
        .map(|(lag, (&acf, &pacf))| AutocorrelationPoint { lag, acf, pacf })
        .collect();
    Ok(AutocorrelationProfile { max_lag, points })
}

/// Pair each price with the price `lag` steps later.
///
/// The lag must be at least 1 and leave at least one pair.
pub fn lag_pairs(series: &PriceSeries, lag: usize) -> Result<LagPairs> {
    if lag == 0 {
        return Err(Error::InvalidInput("lag must be at least 1".into()));
    }
    let n = series.len();
    if lag >= n {
        return Err(Error::InvalidLag { max_lag: lag, len: n });
    }

    let prices = series.prices();
    Ok(LagPairs {
        lag,
        x: prices[..n - lag].to_vec(),
        y: prices[lag..].to_vec(),
    })
}

/// Levinson-Durbin recursion over sample autocorrelations.
///
/// Returns the reflection coefficients, which are the partial
/// autocorrelations, prefixed with 1 for lag 0.
fn levinson_durbin(autocorr: &[f64]) -> Vec<f64> {
    let order = autocorr.len() - 1;
    let mut partial = Vec::with_capacity(order + 1);
    partial.push(1.0);
    if order == 0 {
        return partial;
    }

    let mut phi = vec![vec![0.0; order]; order];
    phi[0][0] = autocorr[1];
    partial.push(autocorr[1]);

    for k in 1..order {
        let mut num = autocorr[k + 1];
        let mut den = 1.0;
        for j in 0..k {
            num -= phi[k - 1][j] * autocorr[k - j];
            den -= phi[k - 1][j] * autocorr[j + 1];
        }

        let pac = if den.abs() < 1e-10 { 0.0 } else { num / den };
        partial.push(pac);
        phi[k][k] = pac;
        for j in 0..k {
            phi[k][j] = phi[k - 1][j] - pac * phi[k - 1][k - 1 - j];
        }
    }

    partial
}
