//! Shared fixtures for integration tests

use std::io::Write;

use brentrs::PriceSeries;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

/// A slice of the Brent schema: day-month-short-year dates, two columns
pub const BRENT_SAMPLE: &str = "\
Date,Price
20-May-87,18.63
21-May-87,18.45
22-May-87,18.55
25-May-87,18.60
26-May-87,18.63
27-May-87,18.60
";

/// Write CSV content to a temp file that cleans itself up on drop
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

/// Daily series starting 2015-01-01 with a 12-step cycle and mild drift
pub fn seasonal_series(n: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date");
    let (dates, prices) = (0..n)
        .map(|i| {
            let cycle = (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin();
            let price = 50.0 + 10.0 * cycle + 0.02 * i as f64;
            (start + chrono::Days::new(i as u64), price)
        })
        .unzip();
    PriceSeries::new(dates, prices).expect("aligned vectors")
}

/// Series over consecutive days from raw values
pub fn daily_series(values: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    let (dates, prices) = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (start + chrono::Days::new(i as u64), v))
        .unzip();
    PriceSeries::new(dates, prices).expect("aligned vectors")
}
