//! Fixed-cadence downsampling of raw samples.
//!
//! Each bucket takes the arithmetic mean of its non-null readings. Short
//! dropouts inside a bucket disappear in the mean; a bucket becomes null
//! only when it holds no reading at all. A run of null buckets is what the
//! report counts as a failure.

use crate::errors::AppResult;
use crate::models::{Sample, Series};
use crate::utils::date::start_of_day;
use crate::utils::time::SamplingRate;
use std::collections::BTreeMap;

#[derive(Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

/// Downsample `samples` to `rate`, stamping each bucket with its start.
///
/// Buckets are aligned to midnight of the earliest sample's day and span
/// from the first to the last populated bucket, empty ones included.
/// Input order does not matter. Samples spread over more than about 292
/// years fail with `InvalidRange`.
pub fn resample_mean(name: &str, samples: &[Sample], rate: SamplingRate) -> AppResult<Series> {
    let Some(first) = samples.iter().map(|s| s.timestamp).min() else {
        return Ok(Series::from_samples(name, &[]));
    };
    let origin = start_of_day(first);

    let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();
    for s in samples {
        let bucket = buckets
            .entry(rate.bucket_index(origin, s.timestamp)?)
            .or_default();
        if let Some(v) = s.value.filter(|v| !v.is_nan()) {
            bucket.sum += v;
            bucket.count += 1;
        }
    }

    let (Some(&lo), Some(&hi)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Ok(Series::from_samples(name, &[]));
    };

    let resampled: Vec<Sample> = (lo..=hi)
        .map(|k| {
            let value = buckets
                .get(&k)
                .filter(|b| b.count > 0)
                .map(|b| b.sum / b.count as f64);
            Ok(Sample::new(rate.bucket_start(origin, k)?, value))
        })
        .collect::<AppResult<_>>()?;

    log::debug!(
        "resampled '{}': {} samples into {} buckets of {}",
        name,
        samples.len(),
        resampled.len(),
        rate
    );

    Ok(Series::from_samples(name, &resampled))
}
