use super::{MemorySource, SeriesSource};
use crate::errors::{AppError, AppResult};
use crate::models::{Sample, SeriesInfo};
use crate::utils::date::parse_datetime;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One row of a long-format export: `tag,timestamp,value`.
/// An empty `value` is a missing reading.
#[derive(Debug, Deserialize)]
struct CsvRow {
    tag: String,
    timestamp: String,
    value: Option<f64>,
}

/// Source loaded from a CSV file, one series per distinct tag.
#[derive(Debug, Clone)]
pub struct CsvSource {
    inner: MemorySource,
}

impl CsvSource {
    pub fn open(path: &Path) -> AppResult<Self> {
        log::info!("Loading series from CSV: {}", path.display());
        let rdr = csv::Reader::from_path(path)?;
        Self::load(rdr)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        Self::load(csv::Reader::from_reader(reader))
    }

    fn load<R: Read>(mut rdr: csv::Reader<R>) -> AppResult<Self> {
        let mut by_tag: BTreeMap<String, Vec<Sample>> = BTreeMap::new();

        for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            let ts = parse_datetime(&row.timestamp).map_err(|_| {
                AppError::InvalidDate(format!(
                    "row {}: '{}' for tag '{}'",
                    line + 1,
                    row.timestamp,
                    row.tag
                ))
            })?;
            by_tag
                .entry(row.tag)
                .or_default()
                .push(Sample::new(ts, row.value));
        }

        let mut inner = MemorySource::new();
        for (tag, samples) in by_tag {
            let info = SeriesInfo::new(tag.clone(), tag);
            inner.insert_with_info(info, samples);
        }

        log::debug!("CSV source holds {} series", inner.len());
        Ok(Self { inner })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SeriesSource for CsvSource {
    fn search(&self, name: &str) -> AppResult<Vec<SeriesInfo>> {
        self.inner.search(name)
    }

    fn pull(
        &self,
        info: &SeriesInfo,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Sample>> {
        self.inner.pull(info, start, end)
    }
}
