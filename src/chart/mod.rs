//! Diagnostic charts: the resampled series with failure buckets marked.

mod pdf;

pub use pdf::{PdfChart, win_ansi_bytes};

use crate::errors::AppResult;
use crate::models::Series;
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Value drawn for null buckets so they stand out below the real readings.
pub const DEFAULT_SENTINEL: f64 = -100.0;

/// A null bucket, placed on the chart at `(timestamp, value)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailureMarker {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Every null position of a stamped series, drawn at `sentinel`.
/// A series without a timestamp axis yields no markers.
pub fn failure_markers(series: &Series, sentinel: f64) -> Vec<FailureMarker> {
    let Some(stamps) = series.timestamps() else {
        return Vec::new();
    };

    stamps
        .iter()
        .zip(series.values())
        .filter(|(_, v)| v.is_none())
        .map(|(ts, _)| FailureMarker {
            timestamp: *ts,
            value: sentinel,
        })
        .collect()
}

/// Something that persists a diagnostic chart and reports where it went.
pub trait ChartSink {
    fn render(&self, tag: &str, series: &Series, markers: &[FailureMarker]) -> AppResult<PathBuf>;
}
