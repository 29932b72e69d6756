//! Unified library error type.
//! All modules (core, db, source, chart, config, utils) return AppError to
//! keep the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Sources
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No series found with name '{0}'")]
    TagNotFound(String),

    #[error("Tag '{tag}' is ambiguous: {matches} series share this exact name")]
    AmbiguousTag { tag: String, matches: usize },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid sampling rate: {0}")]
    InvalidSamplingRate(String),

    // ---------------------------
    // Analysis errors
    // ---------------------------
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    // ---------------------------
    // Chart errors
    // ---------------------------
    #[error("Chart error: {0}")]
    Chart(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
