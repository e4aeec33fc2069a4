//! Shared utilities for the catalog crates.
//!
//! This crate provides common helpers used across the workspace, chiefly
//! conversions between Polars `AnyValue` cells and plain Rust values.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_opt, cell_string, column_strings,
    format_numeric, numeric_series, parse_f64, parse_i64,
};
