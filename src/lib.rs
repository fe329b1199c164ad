//! Commodity Price Analytics
//!
//! This crate loads a univariate daily commodity price series from CSV,
//! validates and temporally indexes it, and computes statistical
//! artifacts over it: summary statistics, rolling mean/std bands,
//! classical seasonal decomposition, autocorrelation and partial
//! autocorrelation profiles, a price histogram, a year-by-month pivot,
//! and a correlation matrix. Every artifact serializes to JSON, so a
//! serving layer can expose results without transformation.

pub mod error;
pub mod io;
pub mod na;
pub mod pivot;
pub mod report;
pub mod series;
pub mod stats;
pub mod temporal;
pub mod time_series;

// Re-export commonly used types
pub use error::{Error, Result};
pub use io::{read_price_csv, write_price_csv, LoadDiagnostics, LoadOptions};
pub use na::NA;
pub use pivot::MonthlyPivot;
pub use report::{AnalysisOptions, AnalysisReport};
pub use series::{PriceObservation, PriceSeries, SourceLayout};
pub use stats::{CorrelationMatrix, Histogram, SummaryStats};
pub use temporal::{DateFormat, RollingStatsResult, RollingWindow};
pub use time_series::{
    AutocorrelationPoint, AutocorrelationProfile, DecompositionModel, DecompositionResult,
    LagPairs,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
