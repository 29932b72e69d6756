//! Module responsible for detecting groups of consecutive missing values
//! and measuring the distance between one group and the next.

use crate::errors::{AppError, AppResult};
use crate::models::{GapAnalysis, GapInterval, NullGroup, Series};
use chrono::NaiveDateTime;

/// Split the series into maximal runs of equal null status and keep the
/// null ones, in series order.
///
/// Single forward pass: a new run starts whenever the null status differs
/// from the previous position.
pub fn null_groups(series: &Series) -> Vec<NullGroup> {
    let mut groups = Vec::new();
    let mut current: Option<NullGroup> = None;

    for (pos, value) in series.values().iter().enumerate() {
        if value.is_none() {
            match current.as_mut() {
                Some(group) => group.end = pos,
                None => current = Some(NullGroup { start: pos, end: pos }),
            }
        } else if let Some(group) = current.take() {
            groups.push(group);
        }
    }

    groups.extend(current);
    groups
}

/// Compute the distance between consecutive null groups of `series`.
///
/// - Without `time_field` the distance is positional:
///   `start(i + 1) - end(i)`.
/// - With `time_field` both positions are resolved through the named time
///   axis and subtracted as a duration.
///
/// At least two null groups are needed to produce an interval; otherwise
/// the interval list is empty and only the group count is reported.
pub fn time_between_null_groups(
    series: &Series,
    time_field: Option<&str>,
) -> AppResult<GapAnalysis> {
    let stamps: Option<&[NaiveDateTime]> = match time_field {
        Some(name) => Some(
            series
                .axis(name)
                .map(|a| a.stamps.as_slice())
                .ok_or_else(|| {
                    AppError::InvalidSeries(format!(
                        "series '{}' has no time axis named '{}' (available: {:?})",
                        series.name(),
                        name,
                        series.axis_names()
                    ))
                })?,
        ),
        None => None,
    };

    if series.null_count() == 0 {
        return Ok(GapAnalysis::default());
    }

    let groups = null_groups(series);
    let null_group_count = groups.len();
    log::debug!(
        "series '{}': {} null values in {} groups",
        series.name(),
        series.null_count(),
        null_group_count
    );

    if null_group_count < 2 {
        return Ok(GapAnalysis {
            intervals: Vec::new(),
            null_group_count,
            null_groups: groups,
        });
    }

    let intervals = groups
        .windows(2)
        .map(|pair| {
            let end_of_current = pair[0].end;
            let start_of_next = pair[1].start;

            match stamps {
                Some(ts) => GapInterval::Elapsed(ts[start_of_next] - ts[end_of_current]),
                None => GapInterval::Positions(start_of_next - end_of_current),
            }
        })
        .collect();

    Ok(GapAnalysis {
        intervals,
        null_group_count,
        null_groups: groups,
    })
}
