//! Input/output for price tables

pub mod csv;

pub use self::csv::{
    read_price_csv, read_price_rows, write_price_csv, write_price_rows, LoadDiagnostics,
    LoadOptions,
};
