//! Price series containers
//!
//! A [`PriceSeries`] is the validated, date-keyed dataset every analysis
//! component consumes. It is created by the CSV loader, put into strict
//! chronological order by [`crate::temporal::index`], and treated as
//! read-only afterward: downstream components borrow it and produce new
//! artifacts instead of mutating it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::temporal::DateFormat;

/// A single dated price record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

/// Source table layout captured at load time so exports can reproduce
/// the original column names, column order, and date format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLayout {
    pub date_column: String,
    pub price_column: String,
    /// Whether the date column preceded the price column in the source
    pub date_column_first: bool,
    pub date_format: DateFormat,
}

impl Default for SourceLayout {
    fn default() -> Self {
        SourceLayout {
            date_column: "Date".to_string(),
            price_column: "Price".to_string(),
            date_column_first: true,
            date_format: DateFormat::Iso,
        }
    }
}

/// Ordered univariate price series keyed by calendar date
#[derive(Debug, Clone)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    layout: SourceLayout,
}

impl PriceSeries {
    /// Create a series from parallel date and price vectors
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(Error::LengthMismatch {
                expected: dates.len(),
                actual: prices.len(),
            });
        }

        Ok(PriceSeries {
            dates,
            prices,
            layout: SourceLayout::default(),
        })
    }

    /// Create a series from observation records
    pub fn from_observations(observations: Vec<PriceObservation>) -> Self {
        let (dates, prices) = observations.into_iter().map(|o| (o.date, o.price)).unzip();
        PriceSeries {
            dates,
            prices,
            layout: SourceLayout::default(),
        }
    }

    /// Attach a source layout for later export
    pub fn with_layout(mut self, layout: SourceLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Dates in series order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Prices in series order
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Layout of the table this series was loaded from
    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    /// Observation at a position
    pub fn get(&self, pos: usize) -> Option<PriceObservation> {
        match (self.dates.get(pos), self.prices.get(pos)) {
            (Some(&date), Some(&price)) => Some(PriceObservation { date, price }),
            _ => None,
        }
    }

    /// First observation, if any
    pub fn first(&self) -> Option<PriceObservation> {
        self.get(0)
    }

    /// Last observation, if any
    pub fn last(&self) -> Option<PriceObservation> {
        self.len().checked_sub(1).and_then(|pos| self.get(pos))
    }

    /// Iterate over observations in series order
    pub fn observations(&self) -> impl Iterator<Item = PriceObservation> + '_ {
        self.dates
            .iter()
            .zip(self.prices.iter())
            .map(|(&date, &price)| PriceObservation { date, price })
    }

    /// Observations as owned records, the shape a serving layer returns
    /// row-oriented JSON from
    pub fn to_records(&self) -> Vec<PriceObservation> {
        self.observations().collect()
    }

    /// First `n` observations as a new series with the same layout
    pub fn head(&self, n: usize) -> PriceSeries {
        let n = n.min(self.len());
        PriceSeries {
            dates: self.dates[..n].to_vec(),
            prices: self.prices[..n].to_vec(),
            layout: self.layout.clone(),
        }
    }

    /// Position of a date, searched in logarithmic time.
    ///
    /// Only meaningful on a date-indexed series; on an unsorted series
    /// the result is unspecified.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Whether dates are strictly increasing, the precondition every
    /// analysis component relies on
    pub fn is_date_indexed(&self) -> bool {
        self.dates.windows(2).all(|w| w[0] < w[1])
    }

    /// Summary statistics of the price column
    pub fn describe(&self) -> Result<crate::stats::SummaryStats> {
        crate::stats::describe(&self.prices)
    }
}
