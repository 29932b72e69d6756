//! rgapwatch library root.
//!
//! Counts sensor failures (runs of missing readings) in a time series and
//! measures the time between them. The gap analysis in [`core::gaps`] is a
//! pure function over an in-memory [`models::Series`]; [`FailureReportBuilder`]
//! wires it to a [`source::SeriesSource`], resampling and a diagnostic chart.

pub mod chart;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod source;
pub mod utils;

pub use crate::core::{FailureReportBuilder, build_report, time_between_null_groups};
pub use errors::{AppError, AppResult};
