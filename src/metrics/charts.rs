//! Chart Aggregator
//!
//! Chart-ready tables for an external renderer. Both functions return `None`
//! for an empty input so callers can tell "no data" apart from a series of
//! zeros.

use crate::flow::FlowRecord;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of cycle-time histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Completed items in one calendar week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyCount {
    /// Monday of the week
    pub week_start: NaiveDate,
    pub completed: usize,
}

/// One equal-width cycle-time bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Lower edge (inclusive)
    pub lower: f64,
    /// Upper edge (exclusive, inclusive for the last bin)
    pub upper: f64,
    pub count: usize,
}

/// Monday on or before the given instant
pub fn week_start(instant: NaiveDateTime) -> NaiveDate {
    let date = instant.date();
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Completed items per week of close, ascending by week
///
/// Only non-empty weeks are emitted.
pub fn weekly_throughput(flow_in_range: &[FlowRecord]) -> Option<Vec<WeeklyCount>> {
    if flow_in_range.is_empty() {
        return None;
    }

    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in flow_in_range {
        *buckets.entry(week_start(record.close)).or_insert(0) += 1;
    }

    Some(
        buckets
            .into_iter()
            .map(|(week_start, completed)| WeeklyCount {
                week_start,
                completed,
            })
            .collect(),
    )
}

/// Cycle-time histogram with `bins` equal-width bins over the observed range
///
/// When every item has the same cycle time the span is widened by half a
/// day on each side.
pub fn cycle_time_histogram(flow_in_range: &[FlowRecord], bins: usize) -> Option<Vec<HistogramBin>> {
    let values: Vec<f64> = flow_in_range
        .iter()
        .map(|r| f64::from(r.cycle_time_days))
        .collect();

    let min = values.iter().cloned().reduce(f64::min)?;
    let max = values.iter().cloned().reduce(f64::max)?;
    let (lower, upper) = if min < max {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };

    let bins = bins.max(1);
    let width = (upper - lower) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in &values {
        let idx = (((value - lower) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lower + i as f64 * width,
                upper: if i + 1 == bins {
                    upper
                } else {
                    lower + (i + 1) as f64 * width
                },
                count,
            })
            .collect(),
    )
}
