//! Time utilities: parsing sampling rates ("1D", "30min", ...), bucket
//! arithmetic, formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)?\s*([A-Za-z]+)\s*$").expect("sampling rate pattern is valid")
});

/// Fixed resampling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingRate {
    step: TimeDelta,
}

impl SamplingRate {
    pub fn new(step: TimeDelta) -> AppResult<Self> {
        if step <= TimeDelta::zero() {
            return Err(AppError::InvalidSamplingRate(format!(
                "step must be positive, got {}",
                format_delta(step)
            )));
        }
        if step.num_nanoseconds().is_none() {
            return Err(AppError::InvalidSamplingRate(format!(
                "step of {} is too long",
                format_delta(step)
            )));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Parse a rate such as `1D`, `12h`, `30min`, `15T`, `10s`, `500ms`, `1W`.
    /// A bare unit (`D`, `h`, ...) means a count of one.
    pub fn parse(s: &str) -> AppResult<Self> {
        let caps = RATE_RE
            .captures(s)
            .ok_or_else(|| AppError::InvalidSamplingRate(s.to_string()))?;

        let count: i64 = match caps.get(1) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| AppError::InvalidSamplingRate(s.to_string()))?,
            None => 1,
        };

        let unit = &caps[2];
        let unit_step = match unit {
            "W" | "w" => TimeDelta::try_weeks(1),
            "D" | "d" | "day" | "days" => TimeDelta::try_days(1),
            "H" | "h" | "hour" | "hours" => TimeDelta::try_hours(1),
            "T" | "min" | "mins" => TimeDelta::try_minutes(1),
            "S" | "s" | "sec" => TimeDelta::try_seconds(1),
            "L" | "ms" => TimeDelta::try_milliseconds(1),
            _ => None,
        }
        .ok_or_else(|| AppError::InvalidSamplingRate(format!("unknown unit '{unit}' in '{s}'")))?;

        let step = i32::try_from(count)
            .ok()
            .and_then(|c| unit_step.checked_mul(c))
            .ok_or_else(|| AppError::InvalidSamplingRate(format!("'{s}' is out of range")))?;

        Self::new(step)
    }

    /// Index of the bucket containing `ts`, counted from `origin`.
    /// Buckets are left-closed: `[origin + k*step, origin + (k+1)*step)`.
    ///
    /// Fails with `InvalidRange` when `ts - origin` does not fit in
    /// nanoseconds (about 292 years).
    pub fn bucket_index(&self, origin: NaiveDateTime, ts: NaiveDateTime) -> AppResult<i64> {
        let offset = (ts - origin)
            .num_nanoseconds()
            .ok_or_else(|| span_too_long(origin, ts))?;
        Ok(div_floor(offset, self.step_nanos()))
    }

    /// Start of the `k`-th bucket from `origin`.
    pub fn bucket_start(&self, origin: NaiveDateTime, k: i64) -> AppResult<NaiveDateTime> {
        self.step_nanos()
            .checked_mul(k)
            .map(TimeDelta::nanoseconds)
            .and_then(|d| origin.checked_add_signed(d))
            .ok_or_else(|| {
                AppError::InvalidRange(format!("bucket {k} from {origin} is out of range"))
            })
    }

    fn step_nanos(&self) -> i64 {
        // checked in `new`
        self.step.num_nanoseconds().unwrap_or(i64::MAX)
    }
}

impl FromStr for SamplingRate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_delta(self.step))
    }
}

fn span_too_long(origin: NaiveDateTime, ts: NaiveDateTime) -> AppError {
    AppError::InvalidRange(format!("{origin} to {ts} is too long to resample"))
}

fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Human readable duration, e.g. `3d 04:05:00`, `00:07:00`, `-01:00:00`.
pub fn format_delta(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let d = d.abs();

    let days = d.num_days();
    let secs = d.num_seconds() - days * 86_400;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if days > 0 {
        format!("{sign}{days}d {h:02}:{m:02}:{s:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}
