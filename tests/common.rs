#![allow(dead_code)]
use chrono::{NaiveDateTime, TimeDelta};
use rgapwatch::models::Sample;
use rgapwatch::source::MemorySource;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parse "YYYY-MM-DD HH:MM" into a timestamp.
pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid test timestamp")
}

/// Create a unique path inside the system temp dir and remove any existing file
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgapwatch.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// Create (and empty) a directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgapwatch", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Hourly readings from 2024-01-01 00:00 to 2024-01-10 23:00 with:
/// - 2024-01-03: every reading present but null
/// - 2024-01-05 10:00..12:00: short dropout (smoothed by a daily mean)
/// - 2024-01-07 and 2024-01-08: no rows at all
pub fn hourly_with_outages() -> Vec<Sample> {
    let start = ts("2024-01-01 00:00");
    let mut out = Vec::new();

    for h in 0..(10 * 24) {
        let t = start + TimeDelta::hours(h);
        let day = h / 24 + 1;
        let hour = h % 24;

        if day == 7 || day == 8 {
            continue;
        }

        let value = if day == 3 || (day == 5 && (10..12).contains(&hour)) {
            None
        } else {
            Some(20.0 + (hour as f64) / 10.0)
        };
        out.push(Sample::new(t, value));
    }
    out
}

/// Memory source with the outage fixture registered as `TI-101`, plus a
/// second series whose name only contains it.
pub fn plant_source() -> MemorySource {
    let mut src = MemorySource::new();
    src.insert("TI-101", hourly_with_outages());
    src.insert("TI-1011", vec![Sample::new(ts("2024-01-01 00:00"), Some(1.0))]);
    src
}
