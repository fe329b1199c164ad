//! Rolling-window statistics over a price series

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::PriceSeries;

/// Rolling mean and standard deviation bands aligned with the source
/// series. The first `window - 1` positions are NA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollingStatsResult {
    pub window: usize,
    pub mean: Vec<NA<f64>>,
    pub std: Vec<NA<f64>>,
}

/// Trailing fixed-length window over a price series.
///
/// Windows are trailing rather than centered so every statistic at
/// position `i` depends only on data available up to that date.
#[derive(Debug)]
pub struct RollingWindow<'a> {
    series: &'a PriceSeries,
    window: usize,
}

impl<'a> RollingWindow<'a> {
    fn new(series: &'a PriceSeries, window: usize) -> Result<Self> {
        if window == 0 || window > series.len() {
            return Err(Error::InvalidWindow {
                window,
                len: series.len(),
            });
        }

        Ok(RollingWindow { series, window })
    }

    /// Rolling arithmetic mean
    pub fn mean(&self) -> Vec<NA<f64>> {
        let prices = self.series.prices();
        let mut result = Vec::with_capacity(prices.len());

        for i in 0..prices.len() {
            if i < self.window - 1 {
                result.push(NA::NA);
            } else {
                let slice = &prices[i + 1 - self.window..=i];
                result.push(NA::Value(slice.iter().sum::<f64>() / slice.len() as f64));
            }
        }

        result
    }

    /// Rolling standard deviation with `ddof` delta degrees of freedom.
    /// Positions whose window holds `ddof` or fewer points are NA.
    pub fn std(&self, ddof: usize) -> Vec<NA<f64>> {
        let prices = self.series.prices();
        let mut result = Vec::with_capacity(prices.len());

        for i in 0..prices.len() {
            if i < self.window - 1 {
                result.push(NA::NA);
            } else {
                let slice = &prices[i + 1 - self.window..=i];
                if slice.len() <= ddof {
                    result.push(NA::NA);
                } else {
                    let mean = slice.iter().sum::<f64>() / slice.len() as f64;
                    let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                        / (slice.len() - ddof) as f64;
                    result.push(NA::Value(variance.sqrt()));
                }
            }
        }

        result
    }

    /// Mean and sample standard deviation bands in one artifact
    pub fn stats(&self) -> RollingStatsResult {
        RollingStatsResult {
            window: self.window,
            mean: self.mean(),
            std: self.std(1),
        }
    }
}

impl PriceSeries {
    /// Trailing window of `window` observations.
    ///
    /// Fails with [`Error::InvalidWindow`] when `window` is zero or
    /// longer than the series.
    pub fn rolling(&self, window: usize) -> Result<RollingWindow<'_>> {
        RollingWindow::new(self, window)
    }
}
