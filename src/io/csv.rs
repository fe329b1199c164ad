//! CSV loading and export for price series
//!
//! Loading validates the raw table: required columns present, every
//! date and price parsable, prices finite. Duplicate dates and missing
//! prices are collected per row and fail the load unless the caller
//! opts out through [`LoadOptions`]. Surrounding whitespace on fields
//! is trimmed and counted as a diagnostic, never an error.
//!
//! Export reproduces the table a series was loaded from: same column
//! names, same column order, same date format.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::series::{PriceSeries, SourceLayout};
use crate::temporal::DateFormat;

/// Options controlling how strictly a raw table is validated at load time
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Name of the date column
    pub date_column: String,
    /// Name of the price column
    pub price_column: String,
    /// Keep rows with duplicate dates instead of failing. The indexer
    /// still rejects duplicates, so this only defers the failure.
    pub allow_duplicates: bool,
    /// Drop rows with missing prices instead of failing
    pub allow_missing: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            date_column: "Date".to_string(),
            price_column: "Price".to_string(),
            allow_duplicates: false,
            allow_missing: false,
        }
    }
}

/// Informational counts gathered while loading
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadDiagnostics {
    /// Fields that carried surrounding whitespace
    pub trimmed_fields: usize,
    /// Observations whose date repeats an earlier row's date
    pub duplicate_dates: usize,
    /// Rows dropped for missing prices, populated only when
    /// `allow_missing` is set
    pub dropped_rows: Vec<usize>,
}

/// Load a price series from a CSV file
pub fn read_price_csv<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<(PriceSeries, LoadDiagnostics)> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_price_rows(file, options)
}

/// Load a price series from any CSV source.
///
/// Row indices in errors and diagnostics are zero-based positions of
/// data records, excluding the header.
pub fn read_price_rows<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<(PriceSeries, LoadDiagnostics)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut diagnostics = LoadDiagnostics::default();

    let headers = rdr.headers().map_err(Error::Csv)?.clone();
    let mut date_idx = None;
    let mut price_idx = None;
    for (i, header) in headers.iter().enumerate() {
        let name = trim_counted(header, &mut diagnostics.trimmed_fields);
        if name == options.date_column {
            date_idx = Some(i);
        } else if name == options.price_column {
            price_idx = Some(i);
        }
    }
    let date_idx = date_idx.ok_or_else(|| Error::Schema(options.date_column.clone()))?;
    let price_idx = price_idx.ok_or_else(|| Error::Schema(options.price_column.clone()))?;

    let mut dates = Vec::new();
    let mut prices = Vec::new();
    let mut bad_dates = Vec::new();
    let mut bad_prices = Vec::new();
    let mut missing = Vec::new();
    let mut seen = HashSet::new();
    // First format that parses a row; reused on export
    let mut detected: Option<DateFormat> = None;

    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(Error::Csv)?;
        for field in record.iter() {
            if field.trim().len() != field.len() {
                diagnostics.trimmed_fields += 1;
            }
        }

        let price_field = record.get(price_idx).unwrap_or("").trim();
        if is_missing_token(price_field) {
            missing.push(row);
            continue;
        }

        let date_field = record.get(date_idx).unwrap_or("").trim();
        let date_value = detected
            .and_then(|format| format.parse(date_field))
            .or_else(|| {
                DateFormat::detect(date_field).map(|(date, format)| {
                    detected.get_or_insert(format);
                    date
                })
            });
        let date_value = match date_value {
            Some(date) => date,
            None => {
                bad_dates.push(row);
                continue;
            }
        };

        let price_value = match price_field.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                bad_prices.push(row);
                continue;
            }
        };

        if !seen.insert(date_value) {
            diagnostics.duplicate_dates += 1;
        }
        dates.push(date_value);
        prices.push(price_value);
    }

    if !bad_dates.is_empty() {
        return Err(Error::Parse {
            column: options.date_column.clone(),
            rows: bad_dates,
        });
    }
    if !bad_prices.is_empty() {
        return Err(Error::Parse {
            column: options.price_column.clone(),
            rows: bad_prices,
        });
    }
    if !missing.is_empty() {
        if !options.allow_missing {
            return Err(Error::MissingValue { rows: missing });
        }
        log::warn!("dropped {} row(s) with missing prices", missing.len());
        diagnostics.dropped_rows = missing;
    }
    if diagnostics.duplicate_dates > 0 {
        if !options.allow_duplicates {
            return Err(Error::DuplicateDate {
                count: diagnostics.duplicate_dates,
            });
        }
        log::warn!(
            "kept {} observation(s) with duplicate dates",
            diagnostics.duplicate_dates
        );
    }
    if diagnostics.trimmed_fields > 0 {
        log::info!(
            "trimmed surrounding whitespace from {} field(s)",
            diagnostics.trimmed_fields
        );
    }

    let layout = SourceLayout {
        date_column: options.date_column.clone(),
        price_column: options.price_column.clone(),
        date_column_first: date_idx < price_idx,
        date_format: detected.unwrap_or(DateFormat::Iso),
    };
    let series = PriceSeries::new(dates, prices)?.with_layout(layout);
    log::info!("loaded {} observation(s)", series.len());

    Ok((series, diagnostics))
}

/// Export a series to a CSV file in its source layout
pub fn write_price_csv<P: AsRef<Path>>(series: &PriceSeries, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    write_price_rows(series, file)
}

/// Export a series to any CSV sink in its source layout
pub fn write_price_rows<W: Write>(series: &PriceSeries, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let layout = series.layout();

    let header = ordered(layout, &layout.date_column, &layout.price_column);
    wtr.write_record(header).map_err(Error::Csv)?;

    for obs in series.observations() {
        let date = layout.date_format.format(obs.date);
        let price = obs.price.to_string();
        wtr.write_record(ordered(layout, &date, &price))
            .map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

fn ordered<'a>(layout: &SourceLayout, date: &'a str, price: &'a str) -> [&'a str; 2] {
    if layout.date_column_first {
        [date, price]
    } else {
        [price, date]
    }
}

fn trim_counted<'a>(field: &'a str, trimmed_fields: &mut usize) -> &'a str {
    let trimmed = field.trim();
    if trimmed.len() != field.len() {
        *trimmed_fields += 1;
    }
    trimmed
}

// Tokens pandas-style readers treat as a null price
fn is_missing_token(s: &str) -> bool {
    s.is_empty()
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
}
