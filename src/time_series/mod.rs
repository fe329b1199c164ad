//! Time Series Analysis Module
//!
//! Structural analysis of a date-indexed price series: classical
//! seasonal decomposition into trend, seasonal, and residual components,
//! and autocorrelation / partial autocorrelation profiles over a lag
//! range.
//!
//! Both analyses expect the strict chronological ordering produced by
//! [`crate::temporal::index`].

pub mod autocorrelation;
pub mod decomposition;

pub use autocorrelation::{
    acf, lag_pairs, pacf, profile, AutocorrelationPoint, AutocorrelationProfile, LagPairs,
};
pub use decomposition::{decompose, DecompositionModel, DecompositionResult};
