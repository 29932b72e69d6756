//! External series sources: anything that can look a signal up by name and
//! return its readings over a time range.

mod csv_file;
mod memory;

pub use csv_file::CsvSource;
pub use memory::MemorySource;

use crate::errors::AppResult;
use crate::models::{Sample, SeriesInfo};
use chrono::NaiveDateTime;

pub trait SeriesSource {
    /// Series whose name contains `name` (case-insensitive). Callers filter
    /// exact matches themselves.
    fn search(&self, name: &str) -> AppResult<Vec<SeriesInfo>>;

    /// Readings of `info` with `start <= timestamp <= end`, ordered by time.
    fn pull(
        &self,
        info: &SeriesInfo,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Sample>>;
}

impl<S: SeriesSource + ?Sized> SeriesSource for &S {
    fn search(&self, name: &str) -> AppResult<Vec<SeriesInfo>> {
        (**self).search(name)
    }

    fn pull(
        &self,
        info: &SeriesInfo,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Sample>> {
        (**self).pull(info, start, end)
    }
}

pub(crate) fn name_matches(candidate: &str, query: &str) -> bool {
    candidate.to_lowercase().contains(&query.to_lowercase())
}
