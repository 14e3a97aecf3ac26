//! Flow Builder
//!
//! Selects the issues that carry both a start and a close timestamp and
//! derives their cycle time in whole days.

use crate::ingest::IssueRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// An issue with a complete start/close pair
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlowRecord {
    /// The normalized source record
    #[serde(flatten)]
    pub issue: IssueRecord,
    /// Work-started instant
    #[serde(skip)]
    pub start: NaiveDateTime,
    /// Work-completed instant
    #[serde(skip)]
    pub close: NaiveDateTime,
    /// Cycle time in whole days, always >= 1
    pub cycle_time_days: u32,
}

impl FlowRecord {
    /// Build a flow record, or `None` when start or close is absent
    pub fn from_issue(issue: IssueRecord) -> Option<Self> {
        let (start, close) = (issue.start?, issue.close?);
        Some(Self {
            cycle_time_days: cycle_time_days(start, close),
            issue,
            start,
            close,
        })
    }

    /// True when the close timestamp precedes the start timestamp
    pub fn is_backward(&self) -> bool {
        self.close < self.start
    }
}

/// Cycle time between two instants in whole days
///
/// Negative elapsed time clamps to zero, the result is rounded half-to-even,
/// and anything below one day counts as one day.
pub fn cycle_time_days(start: NaiveDateTime, close: NaiveDateTime) -> u32 {
    let elapsed_days = (close - start).num_seconds() as f64 / SECONDS_PER_DAY;
    let rounded = elapsed_days.max(0.0).round_ties_even();
    (rounded as u32).max(1)
}

/// Derive the flow set from the normalized issues
///
/// The input is left untouched; issues without a start/close pair are simply
/// not part of the result.
pub fn build_flow(issues: &[IssueRecord]) -> Vec<FlowRecord> {
    let flow: Vec<FlowRecord> = issues
        .iter()
        .cloned()
        .filter_map(FlowRecord::from_issue)
        .collect();

    let backward = flow.iter().filter(|r| r.is_backward()).count();
    if backward > 0 {
        tracing::warn!(
            backward,
            "Flow items closed before they started; cycle time clamped to 1 day"
        );
    }

    tracing::debug!(
        issues = issues.len(),
        flow = flow.len(),
        excluded = issues.len() - flow.len(),
        "Built flow set"
    );

    flow
}
