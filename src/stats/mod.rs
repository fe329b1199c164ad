//! Statistics over price data
//!
//! Descriptive summaries, Pearson correlation over named features, and
//! histogram binning. Every artifact here is a plain serializable value
//! a rendering or serving layer can consume directly.

pub mod descriptive;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::na::NA;

/// Summary statistics of a numeric sequence
///
/// # Example
/// ```rust
/// let stats = brentrs::stats::describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(stats.count, 5);
/// assert!((stats.mean - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator)
    pub std: f64,
    pub min: f64,
    /// 25% quantile
    pub q1: f64,
    /// 50% quantile
    pub median: f64,
    /// 75% quantile
    pub q3: f64,
    pub max: f64,
}

/// Compute summary statistics over a numeric sequence
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<SummaryStats> {
    descriptive::describe_impl(data.as_ref())
}

/// Pairwise Pearson correlation matrix over named features.
///
/// Symmetric with an exact 1.0 diagonal. An entry is NA when the two
/// features share fewer than two defined positions or either side has
/// zero variance over the shared positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    features: Vec<String>,
    values: Vec<Vec<NA<f64>>>,
}

impl CorrelationMatrix {
    /// Feature names in matrix order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Full matrix, row-major in feature order
    pub fn values(&self) -> &[Vec<NA<f64>>] {
        &self.values
    }

    /// Entry for a pair of feature names
    pub fn get(&self, a: &str, b: &str) -> Option<NA<f64>> {
        let row = self.features.iter().position(|f| f == a)?;
        let col = self.features.iter().position(|f| f == b)?;
        Some(self.values[row][col])
    }

    pub(crate) fn from_parts(features: Vec<String>, values: Vec<Vec<NA<f64>>>) -> Self {
        CorrelationMatrix { features, values }
    }
}

/// Compute a correlation matrix over features aligned by position.
///
/// Positions where either feature is NA are excluded pairwise, so one
/// feature's warmup region does not blank out the whole matrix.
pub fn correlation_matrix(features: &[(&str, &[NA<f64>])]) -> Result<CorrelationMatrix> {
    descriptive::correlation_matrix_impl(features)
}

/// Frequency counts of values over equal-width bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin boundaries, one more than the number of bins
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Bin a numeric sequence into `bins` equal-width intervals.
/// The last bin includes its upper edge.
pub fn histogram<T: AsRef<[f64]>>(data: T, bins: usize) -> Result<Histogram> {
    descriptive::histogram_impl(data.as_ref(), bins)
}
