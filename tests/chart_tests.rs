mod common;
use common::{temp_dir, ts};
use rgapwatch::AppError;
use rgapwatch::chart::{
    ChartSink, DEFAULT_SENTINEL, FailureMarker, PdfChart, failure_markers, win_ansi_bytes,
};
use rgapwatch::models::{Sample, Series};
use std::fs;

fn stamped() -> Series {
    Series::from_samples(
        "TI-101",
        &[
            Sample::new(ts("2024-01-01 00:00"), Some(20.0)),
            Sample::new(ts("2024-01-02 00:00"), None),
            Sample::new(ts("2024-01-03 00:00"), Some(21.0)),
            Sample::new(ts("2024-01-04 00:00"), None),
        ],
    )
}

#[test]
fn test_markers_at_null_buckets_with_sentinel() {
    let markers = failure_markers(&stamped(), DEFAULT_SENTINEL);

    assert_eq!(
        markers,
        vec![
            FailureMarker {
                timestamp: ts("2024-01-02 00:00"),
                value: -100.0
            },
            FailureMarker {
                timestamp: ts("2024-01-04 00:00"),
                value: -100.0
            },
        ]
    );
}

#[test]
fn test_positional_series_has_no_markers() {
    let s = Series::new("x", vec![None, Some(1.0)]);
    assert!(failure_markers(&s, DEFAULT_SENTINEL).is_empty());
}

#[test]
fn test_pdf_chart_written() {
    let dir = temp_dir("pdf_chart_written");
    let chart = PdfChart::new(&dir);
    let series = stamped();

    let path = chart
        .render("TI-101", &series, &failure_markers(&series, -5.0))
        .expect("render chart");

    assert_eq!(path, dir.join("TI-101.pdf"));
    let bytes = fs::read(&path).expect("read chart");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_chart_sanitizes_tag() {
    let dir = temp_dir("pdf_chart_sanitized");
    let chart = PdfChart::new(&dir);

    assert_eq!(chart.chart_path("AREA1/TI:101"), dir.join("AREA1_TI_101.pdf"));
    assert_eq!(chart.chart_path(".."), dir.join("series.pdf"));
}

#[test]
fn test_pdf_chart_of_empty_series() {
    let dir = temp_dir("pdf_chart_empty");
    let chart = PdfChart::new(&dir);
    let series = Series::from_samples("empty", &[]);

    let path = chart.render("empty", &series, &[]).expect("render chart");
    assert!(path.exists());
}

#[test]
fn test_pdf_chart_needs_timestamps() {
    let dir = temp_dir("pdf_chart_positional");
    let chart = PdfChart::new(&dir);
    let series = Series::new("x", vec![Some(1.0)]);

    let err = chart.render("x", &series, &[]).unwrap_err();
    assert!(matches!(err, AppError::Chart(_)));
}

#[test]
fn test_chart_text_keeps_latin1_and_replaces_the_rest() {
    assert_eq!(win_ansi_bytes("TI-101"), b"TI-101".to_vec());
    assert_eq!(win_ansi_bytes("Temp\u{e9}rature"), b"Temp\xe9rature".to_vec());
    assert_eq!(win_ansi_bytes("\u{394}P \u{2103}"), b"?P ?".to_vec());
    assert_eq!(win_ansi_bytes("a\tb"), b"a?b".to_vec());
}

#[test]
fn test_pdf_chart_title_of_non_latin1_tag() {
    let dir = temp_dir("pdf_chart_non_latin1");
    let chart = PdfChart::new(&dir);
    let series = stamped();

    let path = chart
        .render("\u{394}P-7", &series, &failure_markers(&series, DEFAULT_SENTINEL))
        .expect("render chart");

    let bytes = fs::read(&path).expect("read chart");
    let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"(?P-7: 4 buckets, 2 failure buckets)"));
    assert!(!contains("\u{394}".as_bytes()));
    assert!(contains(b"/WinAnsiEncoding"));
}
