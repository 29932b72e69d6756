pub mod date;
pub mod path;
pub mod time;

pub use date::{parse_datetime, years_between};
pub use time::{SamplingRate, format_delta};
