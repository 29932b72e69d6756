pub mod gap;
pub mod report;
pub mod sample;
pub mod series;
pub mod series_info;

pub use gap::{GapAnalysis, GapInterval, NullGroup};
pub use report::FailureReport;
pub use sample::Sample;
pub use series::{Series, TIMESTAMP_AXIS, TimeAxis};
pub use series_info::SeriesInfo;
