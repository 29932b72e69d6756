//! SQLite historian: a local store of signals and their readings, usable as
//! a [`SeriesSource`].

pub mod initialize;
pub mod pool;
pub mod queries;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Sample, SeriesInfo};
use crate::source::SeriesSource;
use chrono::NaiveDateTime;
use pool::DbPool;
use std::fs;
use std::path::Path;

pub struct HistorianDb {
    pool: DbPool,
}

impl HistorianDb {
    /// Open (or create) a historian database file and ensure its schema.
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        initialize::init_db(&pool.conn)?;
        log::debug!("Opened historian {}", path.display());
        Ok(Self { pool })
    }

    /// Open the historian configured in `cfg.database`, creating its
    /// directory on first use.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let path = cfg.database_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::open(&path)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        initialize::init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Register a new signal and return its id. Names are not unique.
    pub fn add_signal(&mut self, name: &str, description: &str) -> AppResult<i64> {
        queries::insert_signal(&self.pool.conn, name, description)
    }

    pub fn insert_samples(&mut self, signal_id: i64, samples: &[Sample]) -> AppResult<usize> {
        let written = self
            .pool
            .with_conn(|conn| queries::insert_samples(conn, signal_id, samples))?;
        Ok(written)
    }
}

impl SeriesSource for HistorianDb {
    fn search(&self, name: &str) -> AppResult<Vec<SeriesInfo>> {
        queries::search_signals(&self.pool.conn, name)
    }

    fn pull(
        &self,
        info: &SeriesInfo,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Sample>> {
        let signal_id: i64 = info.id.parse().map_err(|_| {
            AppError::InvalidSeries(format!("'{}' is not a historian signal id", info.id))
        })?;
        queries::load_samples(&self.pool.conn, signal_id, start, end)
    }
}
