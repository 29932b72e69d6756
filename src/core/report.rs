//! Failure evaluation for a single tag: fetch, resample, chart, analyze.

use crate::chart::{ChartSink, DEFAULT_SENTINEL, PdfChart, failure_markers};
use crate::config::{Config, DEFAULT_SAMPLING_RATE, TagMatch};
use crate::core::gaps::time_between_null_groups;
use crate::core::resample::resample_mean;
use crate::errors::{AppError, AppResult};
use crate::models::{FailureReport, SeriesInfo, TIMESTAMP_AXIS};
use crate::source::SeriesSource;
use crate::utils::date::{parse_datetime, years_between};
use crate::utils::time::SamplingRate;

/// Pick the series whose name is exactly `tag` among the search results.
pub fn resolve_tag<S: SeriesSource>(
    source: &S,
    tag: &str,
    policy: TagMatch,
) -> AppResult<SeriesInfo> {
    let mut exact: Vec<SeriesInfo> = source
        .search(tag)?
        .into_iter()
        .filter(|info| info.name == tag)
        .collect();

    match (exact.len(), policy) {
        (0, _) => Err(AppError::TagNotFound(tag.to_string())),
        (1, _) => Ok(exact.remove(0)),
        (n, TagMatch::First) => {
            log::warn!(
                "Tag '{tag}' matches {n} series, using the first one (id {})",
                exact[0].id
            );
            Ok(exact.remove(0))
        }
        (n, TagMatch::Strict) => Err(AppError::AmbiguousTag {
            tag: tag.to_string(),
            matches: n,
        }),
    }
}

pub struct FailureReportBuilder<S: SeriesSource> {
    source: S,
    chart: Option<Box<dyn ChartSink>>,
    tag_match: TagMatch,
    sentinel: f64,
    sampling_rate: String,
}

impl<S: SeriesSource> FailureReportBuilder<S> {
    /// Builder with strict tag matching, daily buckets and no chart output.
    pub fn new(source: S) -> Self {
        Self {
            source,
            chart: None,
            tag_match: TagMatch::Strict,
            sentinel: DEFAULT_SENTINEL,
            sampling_rate: DEFAULT_SAMPLING_RATE.to_string(),
        }
    }

    /// Builder configured from `cfg`: tag policy, sentinel, default
    /// sampling rate and, when enabled, a PDF chart in `cfg.chart_dir`.
    pub fn from_config(source: S, cfg: &Config) -> Self {
        let mut builder = Self::new(source)
            .tag_match(cfg.tag_match)
            .sentinel(cfg.failure_sentinel)
            .sampling_rate(&cfg.sampling_rate);
        if cfg.render_chart {
            builder = builder.chart(PdfChart::new(cfg.chart_path()));
        }
        builder
    }

    pub fn chart<C: ChartSink + 'static>(mut self, chart: C) -> Self {
        self.chart = Some(Box::new(chart));
        self
    }

    pub fn tag_match(mut self, policy: TagMatch) -> Self {
        self.tag_match = policy;
        self
    }

    pub fn sentinel(mut self, value: f64) -> Self {
        self.sentinel = value;
        self
    }

    /// Rate used by [`Self::build_default_report`].
    pub fn sampling_rate(mut self, rate: impl Into<String>) -> Self {
        self.sampling_rate = rate.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Evaluate failures of `tag` between `start_date` and `end_date`.
    ///
    /// A failure is a run of entirely empty buckets after resampling to
    /// `sampling_rate`.
    pub fn build_report(
        &self,
        tag: &str,
        start_date: &str,
        end_date: &str,
        sampling_rate: &str,
    ) -> AppResult<FailureReport> {
        let start = parse_datetime(start_date)?;
        let end = parse_datetime(end_date)?;
        if end < start {
            return Err(AppError::InvalidRange(format!(
                "end {end_date} is before start {start_date}"
            )));
        }
        let rate = SamplingRate::parse(sampling_rate)?;

        let info = resolve_tag(&self.source, tag, self.tag_match)?;
        log::info!("Resolved tag '{}' to series id {}", tag, info.id);

        let samples = self.source.pull(&info, start, end)?;
        log::info!(
            "Fetched {} samples for '{}' between {} and {}",
            samples.len(),
            tag,
            start,
            end
        );

        let resampled = resample_mean(tag, &samples, rate)?;

        let chart_path = match &self.chart {
            Some(chart) => {
                let markers = failure_markers(&resampled, self.sentinel);
                Some(chart.render(tag, &resampled, &markers)?)
            }
            None => None,
        };

        let analysis = time_between_null_groups(&resampled, Some(TIMESTAMP_AXIS))?;
        let first_gap_days = analysis.intervals.first().and_then(|g| g.days());

        let report = FailureReport {
            tag: tag.to_string(),
            gap_count: analysis.null_group_count,
            years_span: years_between(start, end),
            intervals: analysis.intervals,
            first_gap_days,
            buckets: resampled.len(),
            chart_path,
        };

        log::info!("{}", report.summary());
        Ok(report)
    }

    /// [`Self::build_report`] at the builder's sampling rate.
    pub fn build_default_report(
        &self,
        tag: &str,
        start_date: &str,
        end_date: &str,
    ) -> AppResult<FailureReport> {
        self.build_report(tag, start_date, end_date, &self.sampling_rate)
    }
}

/// `(gap_count, years_span)` for `tag`, with strict tag matching and no chart.
pub fn build_report<S: SeriesSource>(
    source: S,
    tag: &str,
    start_date: &str,
    end_date: &str,
    sampling_rate: &str,
) -> AppResult<(usize, f64)> {
    FailureReportBuilder::new(source)
        .build_report(tag, start_date, end_date, sampling_rate)
        .map(|r| r.as_tuple())
}
