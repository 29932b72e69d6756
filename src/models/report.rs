use super::gap::GapInterval;
use std::path::PathBuf;

/// Outcome of a failure evaluation for one tag over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub tag: String,
    /// Number of null groups (failures) in the resampled series.
    pub gap_count: usize,
    /// Analyzed span, in 365.25-day years.
    pub years_span: f64,
    pub intervals: Vec<GapInterval>,
    /// First interval converted to days (only the first one, as the
    /// historical report did). See [`FailureReport::mean_gap_days`].
    pub first_gap_days: Option<f64>,
    /// Number of buckets after resampling.
    pub buckets: usize,
    pub chart_path: Option<PathBuf>,
}

impl FailureReport {
    /// `(gap_count, years_span)`
    pub fn as_tuple(&self) -> (usize, f64) {
        (self.gap_count, self.years_span)
    }

    /// Average of every interval, in days.
    pub fn mean_gap_days(&self) -> Option<f64> {
        let days: Vec<f64> = self.intervals.iter().filter_map(|g| g.days()).collect();
        if days.is_empty() {
            return None;
        }
        Some(days.iter().sum::<f64>() / days.len() as f64)
    }

    pub fn summary(&self) -> String {
        match self.first_gap_days {
            Some(days) => format!(
                "For tag {} there are {} failures in {:.1} years with average time between failures of {:.1} days",
                self.tag, self.gap_count, self.years_span, days
            ),
            None => format!(
                "For tag {} there are {} failures in {:.1} years",
                self.tag, self.gap_count, self.years_span
            ),
        }
    }
}
