//! Date parsing and temporal indexing
//!
//! Raw tables arrive with dates as strings in a handful of formats,
//! sometimes mixed within one file. This module parses them into
//! [`NaiveDate`] values and puts a loaded series into the strict
//! chronological order downstream analysis relies on.

mod window;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::PriceSeries;

pub use self::window::{RollingStatsResult, RollingWindow};

/// Date formats accepted by the parser.
///
/// Every supported format is unambiguous about which component is the
/// year. Digit-only forms where day, month, and year cannot be told
/// apart (`03/04/20`) are rejected rather than guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// `1987-05-20`
    Iso,
    /// `1987/05/20`
    SlashSeparated,
    /// `20-May-87`
    DayMonthShortYear,
    /// `20-May-1987`
    DayMonthFullYear,
    /// `May 20, 1987`
    MonthDayYear,
}

impl DateFormat {
    /// Formats in the order the parser tries them
    pub const ALL: [DateFormat; 5] = [
        DateFormat::Iso,
        DateFormat::SlashSeparated,
        DateFormat::DayMonthShortYear,
        DateFormat::DayMonthFullYear,
        DateFormat::MonthDayYear,
    ];

    /// chrono strftime pattern for this format
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::SlashSeparated => "%Y/%m/%d",
            DateFormat::DayMonthShortYear => "%d-%b-%y",
            DateFormat::DayMonthFullYear => "%d-%b-%Y",
            DateFormat::MonthDayYear => "%b %d, %Y",
        }
    }

    // chrono parses `%Y` from however many digits it finds, so "87" would
    // become year 87 and "05/06/07" year 5. Check the year segment has the
    // expected width before handing the string to chrono.
    fn plausible(&self, s: &str) -> bool {
        fn digits(segment: Option<&str>, width: usize) -> bool {
            segment.is_some_and(|y| y.len() == width && y.bytes().all(|b| b.is_ascii_digit()))
        }

        match self {
            DateFormat::Iso => digits(s.split('-').next(), 4),
            DateFormat::SlashSeparated => digits(s.split('/').next(), 4),
            DateFormat::DayMonthShortYear => digits(s.rsplit('-').next(), 2),
            DateFormat::DayMonthFullYear => digits(s.rsplit('-').next(), 4),
            DateFormat::MonthDayYear => digits(s.split_whitespace().last(), 4),
        }
    }

    /// Parse a string in exactly this format
    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        if !self.plausible(s) {
            return None;
        }
        NaiveDate::parse_from_str(s, self.pattern()).ok()
    }

    /// Render a date in this format
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Find the first format that parses `s`, returning the parsed date
    /// along with the format that matched
    pub fn detect(s: &str) -> Option<(NaiveDate, DateFormat)> {
        Self::ALL.iter().find_map(|f| f.parse(s).map(|d| (d, *f)))
    }
}

/// Parse a date string, trying each supported format in order
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    DateFormat::detect(s)
        .map(|(date, _)| date)
        .ok_or_else(|| Error::DateParse(s.to_string()))
}

/// Sort a series ascending by date, failing when two observations share
/// a date.
///
/// The reported count is the number of observations whose date repeats
/// an earlier one. The returned series keeps the input's source layout
/// and satisfies [`PriceSeries::is_date_indexed`].
pub fn index(series: &PriceSeries) -> Result<PriceSeries> {
    let mut pairs: Vec<(NaiveDate, f64)> =
        series.observations().map(|o| (o.date, o.price)).collect();
    pairs.sort_by_key(|&(date, _)| date);

    let duplicates = pairs.windows(2).filter(|w| w[0].0 == w[1].0).count();
    if duplicates > 0 {
        return Err(Error::DuplicateDate { count: duplicates });
    }

    let (dates, prices) = pairs.into_iter().unzip();
    Ok(PriceSeries::new(dates, prices)?.with_layout(series.layout().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_supported_formats() {
        assert_eq!(parse_date("1987-05-20").unwrap(), date(1987, 5, 20));
        assert_eq!(parse_date("1987/05/20").unwrap(), date(1987, 5, 20));
        assert_eq!(parse_date("20-May-87").unwrap(), date(1987, 5, 20));
        assert_eq!(parse_date("20-May-1987").unwrap(), date(1987, 5, 20));
        assert_eq!(parse_date("May 20, 1987").unwrap(), date(1987, 5, 20));
        assert_eq!(parse_date("4-Apr-90").unwrap(), date(1990, 4, 4));
        assert_eq!(parse_date("Apr 22, 2020").unwrap(), date(2020, 4, 22));
    }

    #[test]
    fn test_parse_rejects_ambiguous_and_malformed() {
        // day/month/year order cannot be told apart
        assert!(parse_date("03/04/2020").is_err());
        assert!(parse_date("05/06/07").is_err());
        assert!(parse_date("03-04-2020").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("1987-13-01").is_err());
    }

    #[test]
    fn test_detect_reports_matching_format() {
        let (_, format) = DateFormat::detect("20-May-87").unwrap();
        assert_eq!(format, DateFormat::DayMonthShortYear);
        let (_, format) = DateFormat::detect("2020-04-22").unwrap();
        assert_eq!(format, DateFormat::Iso);
    }

    #[test]
    fn test_format_round_trips() {
        for format in DateFormat::ALL {
            let rendered = format.format(date(1987, 5, 20));
            assert_eq!(format.parse(&rendered), Some(date(1987, 5, 20)));
        }
    }

    #[test]
    fn test_index_sorts_and_keeps_layout() {
        let series = PriceSeries::new(
            vec![date(2020, 1, 3), date(2020, 1, 1), date(2020, 1, 2)],
            vec![3.0, 1.0, 2.0],
        )
        .unwrap();
        assert!(!series.is_date_indexed());

        let indexed = index(&series).unwrap();
        assert!(indexed.is_date_indexed());
        assert_eq!(indexed.prices(), &[1.0, 2.0, 3.0]);
        assert_eq!(indexed.layout(), series.layout());
        assert_eq!(indexed.position(date(2020, 1, 2)), Some(1));
        assert_eq!(indexed.position(date(2020, 1, 9)), None);
    }

    #[test]
    fn test_index_rejects_duplicate_dates() {
        let series = PriceSeries::new(
            vec![date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 1)],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();

        match index(&series) {
            Err(Error::DuplicateDate { count }) => assert_eq!(count, 1),
            other => panic!("expected DuplicateDate, got {:?}", other.map(|s| s.len())),
        }
    }
}
