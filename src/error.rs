use thiserror::Error;

/// Error type shared across the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required column: {0}")]
    Schema(String),

    #[error("unrecognized date: {0}")]
    DateParse(String),

    #[error("column '{column}' has {} unparsable value(s) at rows {rows:?}", .rows.len())]
    Parse { column: String, rows: Vec<usize> },

    #[error("{count} duplicate date(s) in series")]
    DuplicateDate { count: usize },

    #[error("{} row(s) with missing price values at rows {rows:?}", .rows.len())]
    MissingValue { rows: Vec<usize> },

    #[error("window size {window} is invalid for series of length {len}")]
    InvalidWindow { window: usize, len: usize },

    #[error("max lag {max_lag} must be smaller than series length {len}")]
    InvalidLag { max_lag: usize, len: usize },

    #[error("insufficient data: need at least {required} observations, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("computation failed: {0}")]
    Computation(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
