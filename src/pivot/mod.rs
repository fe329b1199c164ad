//! Calendar pivot of a price series
//!
//! Summarizes a daily series into a year-by-month table of mean prices,
//! the shape seasonal heatmaps consume. Cells with no observations are
//! NA, which covers partial first and last years.

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::PriceSeries;

/// Mean price per calendar month, one row per year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPivot {
    years: Vec<i32>,
    /// One row per year, always 12 cells wide (January first)
    cells: Vec<Vec<NA<f64>>>,
}

impl MonthlyPivot {
    /// Years covered by the series, ascending
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// All rows, aligned with [`years`](Self::years)
    pub fn cells(&self) -> &[Vec<NA<f64>>] {
        &self.cells
    }

    /// The 12 monthly cells for one year
    pub fn row(&self, year: i32) -> Option<&[NA<f64>]> {
        let pos = self.years.binary_search(&year).ok()?;
        Some(&self.cells[pos])
    }

    /// Mean price for a 1-based calendar month of a year
    pub fn get(&self, year: i32, month: u32) -> Option<NA<f64>> {
        if !(1..=12).contains(&month) {
            return None;
        }
        self.row(year).map(|row| row[month as usize - 1])
    }
}

/// Pivot a series into per-year mean prices by calendar month
pub fn monthly_mean(series: &PriceSeries) -> Result<MonthlyPivot> {
    if series.is_empty() {
        return Err(Error::EmptyData("cannot pivot an empty series".into()));
    }

    // (year, month) -> observed prices
    let mut buckets: HashMap<(i32, u32), Vec<f64>> = HashMap::new();
    for obs in series.observations() {
        buckets
            .entry((obs.date.year(), obs.date.month()))
            .or_insert_with(Vec::new)
            .push(obs.price);
    }

    let mut years: Vec<i32> = buckets.keys().map(|&(year, _)| year).collect();
    years.sort_unstable();
    years.dedup();

    let cells = years
        .iter()
        .map(|&year| {
            (1..=12)
                .map(|month| match buckets.get(&(year, month)) {
                    Some(prices) => NA::Value(prices.iter().sum::<f64>() / prices.len() as f64),
                    None => NA::NA,
                })
                .collect()
        })
        .collect();

    Ok(MonthlyPivot { years, cells })
}
