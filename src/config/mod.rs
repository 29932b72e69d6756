use crate::chart::DEFAULT_SENTINEL;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Resampling cadence used when none is given.
pub const DEFAULT_SAMPLING_RATE: &str = "1D";

/// How an ambiguous tag (several series with the same exact name) is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// Exactly one exact match is required.
    #[default]
    Strict,
    /// Take the first exact match, in source order.
    First,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_chart_dir")]
    pub chart_dir: String,
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: String,
    #[serde(default = "default_sentinel")]
    pub failure_sentinel: f64,
    #[serde(default)]
    pub tag_match: TagMatch,
    #[serde(default = "default_render_chart")]
    pub render_chart: bool,
}

fn default_database() -> String {
    Config::config_dir()
        .join("historian.sqlite")
        .to_string_lossy()
        .to_string()
}
fn default_chart_dir() -> String {
    ".".to_string()
}
fn default_sampling_rate() -> String {
    DEFAULT_SAMPLING_RATE.to_string()
}
fn default_sentinel() -> f64 {
    DEFAULT_SENTINEL
}
fn default_render_chart() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            chart_dir: default_chart_dir(),
            sampling_rate: default_sampling_rate(),
            failure_sentinel: default_sentinel(),
            tag_match: TagMatch::default(),
            render_chart: default_render_chart(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rgapwatch")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rgapwatch.conf")
    }

    /// Load configuration from the standard file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        if !self.failure_sentinel.is_finite() {
            return Err(AppError::Config(
                "failure_sentinel must be a finite number".to_string(),
            ));
        }
        crate::utils::SamplingRate::parse(&self.sampling_rate)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn chart_path(&self) -> PathBuf {
        expand_tilde(&self.chart_dir)
    }
}
