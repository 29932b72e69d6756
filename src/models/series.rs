//! In-memory series of optional readings, addressable by position and,
//! optionally, through one or more named time axes.

use super::sample::Sample;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

/// Name of the axis attached by [`Series::from_samples`].
pub const TIMESTAMP_AXIS: &str = "timestamp";

/// One timestamp per position of the owning series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub name: String,
    pub stamps: Vec<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<Option<f64>>,
    axes: Vec<TimeAxis>,
}

impl Series {
    /// Positional series without any time axis. NaN values are stored as nulls.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();

        Self {
            name: name.into(),
            values,
            axes: Vec::new(),
        }
    }

    /// Series whose positions are stamped by the `timestamp` axis.
    pub fn from_samples(name: impl Into<String>, samples: &[Sample]) -> Self {
        let values = samples.iter().map(|s| s.value).collect();
        let stamps = samples.iter().map(|s| s.timestamp).collect();

        let mut series = Self::new(name, values);
        series.axes.push(TimeAxis {
            name: TIMESTAMP_AXIS.to_string(),
            stamps,
        });
        series
    }

    /// Attach (or replace) a named time axis.
    /// The axis must carry exactly one timestamp per position.
    pub fn with_axis(
        mut self,
        name: impl Into<String>,
        stamps: Vec<NaiveDateTime>,
    ) -> AppResult<Self> {
        let name = name.into();

        if stamps.len() != self.values.len() {
            return Err(AppError::InvalidSeries(format!(
                "time axis '{}' has {} entries but the series has {} values",
                name,
                stamps.len(),
                self.values.len()
            )));
        }

        self.axes.retain(|a| a.name != name);
        self.axes.push(TimeAxis { name, stamps });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_null(&self, pos: usize) -> bool {
        matches!(self.values.get(pos), Some(None))
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    pub fn axis(&self, name: &str) -> Option<&TimeAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Stamps of the default `timestamp` axis, when present.
    pub fn timestamps(&self) -> Option<&[NaiveDateTime]> {
        self.axis(TIMESTAMP_AXIS).map(|a| a.stamps.as_slice())
    }

    /// Rebuild the samples of a stamped series.
    pub fn samples(&self) -> Option<Vec<Sample>> {
        let stamps = self.timestamps()?;
        Some(
            stamps
                .iter()
                .zip(&self.values)
                .map(|(ts, v)| Sample::new(*ts, *v))
                .collect(),
        )
    }
}
