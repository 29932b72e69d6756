use chrono::TimeDelta;
use std::fmt;

const NANOS_PER_DAY: f64 = 86_400.0 * 1_000_000_000.0;

/// A maximal run of missing values, as inclusive positions in the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullGroup {
    pub start: usize,
    pub end: usize,
}

impl NullGroup {
    /// Number of consecutive missing positions in the group.
    pub fn size(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Distance between the end of a null group and the start of the next one.
///
/// The unit depends on how the analysis was run: positional distance when
/// no time axis was requested, elapsed time otherwise. The two are never
/// converted into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapInterval {
    Positions(usize),
    Elapsed(TimeDelta),
}

impl GapInterval {
    pub fn as_positions(&self) -> Option<usize> {
        match self {
            GapInterval::Positions(n) => Some(*n),
            GapInterval::Elapsed(_) => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            GapInterval::Positions(_) => None,
            GapInterval::Elapsed(d) => Some(*d),
        }
    }

    /// Elapsed time expressed in (fractional) days. `None` for positional gaps.
    pub fn days(&self) -> Option<f64> {
        self.as_duration().map(|d| {
            let nanos = d.num_seconds() as f64 * 1_000_000_000.0 + d.subsec_nanos() as f64;
            nanos / NANOS_PER_DAY
        })
    }
}

impl fmt::Display for GapInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapInterval::Positions(n) => write!(f, "{n} positions"),
            GapInterval::Elapsed(d) => write!(f, "{}", crate::utils::time::format_delta(*d)),
        }
    }
}

/// Result of a gap analysis over a single series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapAnalysis {
    /// One entry per pair of consecutive null groups, in series order.
    pub intervals: Vec<GapInterval>,
    pub null_group_count: usize,
    pub null_groups: Vec<NullGroup>,
}

impl GapAnalysis {
    pub fn into_parts(self) -> (Vec<GapInterval>, usize) {
        (self.intervals, self.null_group_count)
    }
}
