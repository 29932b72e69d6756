use chrono::NaiveDateTime;

/// A single reading of a monitored signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>, // None ⇔ missing reading
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: value.filter(|v| !v.is_nan()),
        }
    }

    pub fn missing(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none_or(f64::is_nan)
    }
}
