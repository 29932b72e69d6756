pub mod gaps;
pub mod report;
pub mod resample;

pub use gaps::{null_groups, time_between_null_groups};
pub use report::{FailureReportBuilder, build_report, resolve_tag};
pub use resample::resample_mean;
