//! Bundled analysis pipeline
//!
//! Computes every artifact the crate produces over one indexed series:
//! summary statistics, rolling bands, seasonal decomposition, the
//! autocorrelation profile, the price/rolling-mean correlation matrix,
//! a price histogram, and the monthly pivot. The report is a plain
//! serializable struct, so a serving layer can hand it out as JSON
//! without transformation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::na::NA;
use crate::pivot::{self, MonthlyPivot};
use crate::series::PriceSeries;
use crate::stats::{self, CorrelationMatrix, Histogram, SummaryStats};
use crate::temporal::RollingStatsResult;
use crate::time_series::{self, AutocorrelationProfile, DecompositionModel, DecompositionResult};

/// Knobs for [`AnalysisReport::compute`].
///
/// The rolling window and the seasonal period are independent; they
/// default to the same value because monthly structure dominates daily
/// commodity series, not because they are coupled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Trailing window length in observations
    pub window: usize,
    /// Seasonal period in observations
    pub period: usize,
    pub model: DecompositionModel,
    /// Highest autocorrelation lag
    pub max_lag: usize,
    /// Histogram bin count
    pub bins: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            window: 12,
            period: 12,
            model: DecompositionModel::Multiplicative,
            max_lag: 50,
            bins: 30,
        }
    }
}

/// Every analysis artifact over one series
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: SummaryStats,
    pub rolling: RollingStatsResult,
    pub decomposition: DecompositionResult,
    pub autocorrelation: AutocorrelationProfile,
    /// Correlation of the raw price with its rolling mean
    pub correlation: CorrelationMatrix,
    pub histogram: Histogram,
    pub monthly: MonthlyPivot,
}

impl AnalysisReport {
    /// Compute all artifacts sequentially
    pub fn compute(series: &PriceSeries, options: &AnalysisOptions) -> Result<AnalysisReport> {
        let rolling = series.rolling(options.window)?.stats();
        let summary = series.describe()?;
        let decomposition = time_series::decompose(series, options.period, options.model)?;
        let autocorrelation = time_series::profile(series, options.max_lag)?;
        let histogram = stats::histogram(series.prices(), options.bins)?;
        let monthly = pivot::monthly_mean(series)?;
        let correlation = price_correlation(series, &rolling)?;

        Ok(AnalysisReport {
            summary,
            rolling,
            decomposition,
            autocorrelation,
            correlation,
            histogram,
            monthly,
        })
    }

    /// Compute all artifacts, fanning the heavy components out with
    /// `rayon`. Produces the same report, and the same error, as
    /// [`compute`](Self::compute).
    pub fn compute_parallel(
        series: &PriceSeries,
        options: &AnalysisOptions,
    ) -> Result<AnalysisReport> {
        // The window is validated before any work is forked; component
        // errors are drained in the sequential order afterward.
        let rolling_window = series.rolling(options.window)?;

        let ((decomposition, autocorrelation), (rolling, summary)) = rayon::join(
            || {
                rayon::join(
                    || time_series::decompose(series, options.period, options.model),
                    || time_series::profile(series, options.max_lag),
                )
            },
            || rayon::join(|| rolling_window.stats(), || series.describe()),
        );
        let summary = summary?;
        let decomposition = decomposition?;
        let autocorrelation = autocorrelation?;

        let histogram = stats::histogram(series.prices(), options.bins)?;
        let monthly = pivot::monthly_mean(series)?;
        let correlation = price_correlation(series, &rolling)?;

        Ok(AnalysisReport {
            summary,
            rolling,
            decomposition,
            autocorrelation,
            correlation,
            histogram,
            monthly,
        })
    }

    /// The whole report as one JSON document, NA positions as `null`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Pearson correlation of the price column against its rolling mean.
/// The rolling warmup positions are NA and drop out pairwise.
fn price_correlation(
    series: &PriceSeries,
    rolling: &RollingStatsResult,
) -> Result<CorrelationMatrix> {
    let prices: Vec<NA<f64>> = series.prices().iter().map(|&p| NA::Value(p)).collect();
    let features = [
        (series.layout().price_column.as_str(), prices.as_slice()),
        ("rolling_mean", rolling.mean.as_slice()),
    ];
    stats::correlation_matrix(&features)
}
