//! Metrics Aggregator
//!
//! Scalar delivery KPIs for one date window. Every call returns a fresh
//! `MetricsResult`; nothing is cached between windows.

use crate::flow::{DateWindow, FlowRecord};
use crate::ingest::{IssueKind, IssueRecord};
use serde::Serialize;

/// Per-kind counts over a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub story: usize,
    pub task: usize,
    pub bug: usize,
}

impl KindCounts {
    /// Count stories, tasks and bugs; other kinds are ignored
    pub fn tally<'a>(kinds: impl IntoIterator<Item = &'a IssueKind>) -> Self {
        kinds.into_iter().fold(Self::default(), |mut counts, kind| {
            match kind {
                IssueKind::Story => counts.story += 1,
                IssueKind::Task => counts.task += 1,
                IssueKind::Bug => counts.bug += 1,
                IssueKind::Other => {}
            }
            counts
        })
    }
}

/// Aggregate delivery metrics for a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Inclusive day count of the window, at least 1
    pub days_in_range: i64,
    /// Flow items closed in the window
    pub completed_total: usize,
    pub throughput_per_day: f64,
    pub throughput_per_week: f64,
    /// Mean cycle time, 0.0 when nothing was completed
    pub avg_cycle_time_days: f64,
    pub stories_done: usize,
    pub tasks_done: usize,
    pub bugs_done: usize,
    /// Bugs created in the window
    pub bugs_created: usize,
    /// (stories_done + tasks_done) / bugs_created, `None` when no bugs were created
    pub defect_density: Option<f64>,
}

/// Compute the KPIs for a window from its two filtered sets
pub fn compute_metrics(
    flow_in_range: &[FlowRecord],
    created_in_range: &[IssueRecord],
    window: &DateWindow,
) -> MetricsResult {
    let done = KindCounts::tally(flow_in_range.iter().map(|r| &r.issue.kind));
    let created = KindCounts::tally(created_in_range.iter().map(|r| &r.kind));

    let days_in_range = window.days_inclusive();
    let completed_total = flow_in_range.len();
    let throughput_per_day = completed_total as f64 / days_in_range as f64;
    let throughput_per_week = throughput_per_day * 7.0;

    let avg_cycle_time_days = if completed_total > 0 {
        let total: u64 = flow_in_range
            .iter()
            .map(|r| u64::from(r.cycle_time_days))
            .sum();
        total as f64 / completed_total as f64
    } else {
        0.0
    };

    let bugs_created = created.bug;
    let defect_density = defect_density(done.story + done.task, bugs_created);

    MetricsResult {
        days_in_range,
        completed_total,
        throughput_per_day,
        throughput_per_week,
        avg_cycle_time_days,
        stories_done: done.story,
        tasks_done: done.task,
        bugs_done: done.bug,
        bugs_created,
        defect_density,
    }
}

/// Ratio of non-bug work done to bugs created; undefined without bugs
pub fn defect_density(work_done: usize, bugs_created: usize) -> Option<f64> {
    (bugs_created > 0).then(|| work_done as f64 / bugs_created as f64)
}
