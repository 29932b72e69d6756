mod common;
use chrono::TimeDelta;
use common::{hourly_with_outages, ts};
use rgapwatch::AppError;
use rgapwatch::core::resample_mean;
use rgapwatch::models::Sample;
use rgapwatch::utils::SamplingRate;

fn rate(s: &str) -> SamplingRate {
    SamplingRate::parse(s).expect("valid rate")
}

#[test]
fn test_bucket_mean_of_non_null_values() {
    let samples = vec![
        Sample::new(ts("2024-01-01 00:10"), Some(1.0)),
        Sample::new(ts("2024-01-01 00:20"), None),
        Sample::new(ts("2024-01-01 00:40"), Some(3.0)),
        Sample::new(ts("2024-01-01 01:05"), Some(10.0)),
    ];
    let s = resample_mean("x", &samples, rate("1h")).expect("resample");

    assert_eq!(s.values(), &[Some(2.0), Some(10.0)]);
    assert_eq!(
        s.timestamps().expect("stamped"),
        &[ts("2024-01-01 00:00"), ts("2024-01-01 01:00")]
    );
}

#[test]
fn test_empty_bucket_becomes_null() {
    let samples = vec![
        Sample::new(ts("2024-01-01 00:15"), Some(1.0)),
        Sample::new(ts("2024-01-01 03:15"), Some(4.0)),
    ];
    let s = resample_mean("x", &samples, rate("1h")).expect("resample");

    assert_eq!(s.values(), &[Some(1.0), None, None, Some(4.0)]);
}

#[test]
fn test_bucket_with_only_nulls_becomes_null() {
    let samples = vec![
        Sample::new(ts("2024-01-01 00:15"), Some(1.0)),
        Sample::new(ts("2024-01-01 01:15"), None),
        Sample::new(ts("2024-01-01 01:45"), None),
        Sample::new(ts("2024-01-01 02:15"), Some(4.0)),
    ];
    let s = resample_mean("x", &samples, rate("1h")).expect("resample");

    assert_eq!(s.values(), &[Some(1.0), None, Some(4.0)]);
}

#[test]
fn test_buckets_aligned_to_midnight_of_first_day() {
    let samples = vec![
        Sample::new(ts("2024-01-01 07:50"), Some(1.0)),
        Sample::new(ts("2024-01-01 09:10"), Some(2.0)),
    ];
    let s = resample_mean("x", &samples, rate("6h")).expect("resample");

    assert_eq!(
        s.timestamps().expect("stamped"),
        &[ts("2024-01-01 06:00")]
    );
    assert_eq!(s.values(), &[Some(1.5)]);
}

#[test]
fn test_left_closed_buckets() {
    let samples = vec![
        Sample::new(ts("2024-01-01 00:00"), Some(1.0)),
        Sample::new(ts("2024-01-01 01:00"), Some(5.0)),
    ];
    let s = resample_mean("x", &samples, rate("1h")).expect("resample");

    assert_eq!(s.values(), &[Some(1.0), Some(5.0)]);
}

#[test]
fn test_unsorted_input() {
    let samples = vec![
        Sample::new(ts("2024-01-02 12:00"), Some(4.0)),
        Sample::new(ts("2024-01-01 12:00"), Some(2.0)),
    ];
    let s = resample_mean("x", &samples, rate("D")).expect("resample");

    assert_eq!(s.values(), &[Some(2.0), Some(4.0)]);
    assert_eq!(s.timestamps().expect("stamped")[0], ts("2024-01-01 00:00"));
}

#[test]
fn test_empty_input_gives_empty_stamped_series() {
    let s = resample_mean("x", &[], rate("1D")).expect("resample");

    assert!(s.is_empty());
    assert_eq!(s.timestamps().map(|t| t.len()), Some(0));
}

#[test]
fn test_daily_resample_smooths_short_dropouts() {
    let s = resample_mean("TI-101", &hourly_with_outages(), rate("1D")).expect("resample");

    assert_eq!(s.len(), 10);
    let nulls: Vec<usize> = (0..s.len()).filter(|&i| s.is_null(i)).collect();
    // Jan 3 (all null), Jan 7 and Jan 8 (no rows); the Jan 5 dropout is averaged away
    assert_eq!(nulls, vec![2, 6, 7]);
}

#[test]
fn test_sampling_rate_units() {
    assert_eq!(rate("1D").step(), TimeDelta::days(1));
    assert_eq!(rate("D").step(), TimeDelta::days(1));
    assert_eq!(rate("12h").step(), TimeDelta::hours(12));
    assert_eq!(rate("12H").step(), TimeDelta::hours(12));
    assert_eq!(rate("30min").step(), TimeDelta::minutes(30));
    assert_eq!(rate("15T").step(), TimeDelta::minutes(15));
    assert_eq!(rate("10s").step(), TimeDelta::seconds(10));
    assert_eq!(rate("500ms").step(), TimeDelta::milliseconds(500));
    assert_eq!(rate("2W").step(), TimeDelta::weeks(2));
    assert_eq!(rate(" 3 d ").step(), TimeDelta::days(3));
}

#[test]
fn test_invalid_sampling_rates() {
    for bad in ["", "0D", "5x", "1.5h", "-1D", "D1"] {
        let err = SamplingRate::parse(bad).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidSamplingRate(_)),
            "'{bad}' should be rejected"
        );
    }
}

#[test]
fn test_resample_rejects_spans_beyond_nanosecond_range() {
    let samples = vec![
        Sample::new(ts("1800-01-01 00:00"), Some(1.0)),
        Sample::new(ts("2200-01-01 00:00"), Some(2.0)),
    ];

    let err = resample_mean("x", &samples, rate("1D")).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange(_)));
}

#[test]
fn test_resample_spanning_two_centuries() {
    let samples = vec![
        Sample::new(ts("1900-01-01 00:00"), Some(1.0)),
        Sample::new(ts("2100-01-01 00:00"), Some(2.0)),
    ];

    let s = resample_mean("x", &samples, rate("1W")).expect("resample");
    assert_eq!(s.values().first(), Some(&Some(1.0)));
    assert_eq!(s.values().last(), Some(&Some(2.0)));
    assert_eq!(s.null_count(), s.len() - 2);
}

#[test]
fn test_sampling_rate_step_must_fit_nanoseconds() {
    let err = SamplingRate::parse("100000000W").unwrap_err();
    assert!(matches!(err, AppError::InvalidSamplingRate(_)));
}

#[test]
fn test_sampling_rate_from_str() {
    let r: SamplingRate = "1h".parse().expect("valid rate");
    assert_eq!(r.step(), TimeDelta::hours(1));
    assert_eq!(r.to_string(), "01:00:00");
}
