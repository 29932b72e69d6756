use super::{SeriesSource, name_matches};
use crate::errors::{AppError, AppResult};
use crate::models::{Sample, SeriesInfo};
use chrono::NaiveDateTime;

/// Source backed by vectors held in memory. Several series may share a name.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: Vec<(SeriesInfo, Vec<Sample>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series; its id is its insertion index.
    pub fn insert(&mut self, name: &str, samples: Vec<Sample>) -> SeriesInfo {
        let info = SeriesInfo::new(self.entries.len().to_string(), name);
        self.insert_with_info(info.clone(), samples);
        info
    }

    pub fn insert_with_info(&mut self, info: SeriesInfo, mut samples: Vec<Sample>) {
        samples.sort_by_key(|s| s.timestamp);
        self.entries.push((info, samples));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SeriesSource for MemorySource {
    fn search(&self, name: &str) -> AppResult<Vec<SeriesInfo>> {
        Ok(self
            .entries
            .iter()
            .filter(|(info, _)| name_matches(&info.name, name))
            .map(|(info, _)| info.clone())
            .collect())
    }

    fn pull(
        &self,
        info: &SeriesInfo,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Sample>> {
        let (_, samples) = self
            .entries
            .iter()
            .find(|(i, _)| i.id == info.id)
            .ok_or_else(|| AppError::TagNotFound(info.name.clone()))?;

        Ok(samples
            .iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .copied()
            .collect())
    }
}
