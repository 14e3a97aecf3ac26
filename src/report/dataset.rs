//! Flow dataset and query pipeline
//!
//! A `FlowDataset` is the immutable snapshot one export produces: the
//! normalized issues plus their flow set. Each `query` is a full
//! recomputation for one window; the dataset is only borrowed, so queries
//! for different windows can run side by side.

use crate::error::{FlowError, FlowResult};
use crate::flow::{build_flow, filter_date_range, DateWindow, FlowRecord};
use crate::ingest::IssueRecord;
use crate::metrics::{
    compute_metrics, cycle_time_histogram, weekly_throughput, HistogramBin, MetricsResult,
    WeeklyCount, DEFAULT_HISTOGRAM_BINS,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Chart settings for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Number of cycle-time histogram bins
    pub histogram_bins: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// Everything computed for one window
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub window: DateWindow,
    pub metrics: MetricsResult,
    /// Completed items per week, `None` when nothing was completed
    pub weekly: Option<Vec<WeeklyCount>>,
    /// Cycle-time histogram, `None` when nothing was completed
    pub histogram: Option<Vec<HistogramBin>>,
    /// Completed items, most recently closed first
    pub items: Vec<FlowRecord>,
}

/// Normalized issues and their flow set
#[derive(Debug, Clone)]
pub struct FlowDataset {
    issues: Vec<IssueRecord>,
    flow: Vec<FlowRecord>,
}

impl FlowDataset {
    /// Build the flow set for a batch of issues
    ///
    /// Fails with `NoFlowRecords` when no issue has both start and close.
    pub fn from_issues(issues: Vec<IssueRecord>) -> FlowResult<Self> {
        let flow = build_flow(&issues);
        if flow.is_empty() {
            return Err(FlowError::NoFlowRecords);
        }

        tracing::info!(
            issues = issues.len(),
            flow = flow.len(),
            "Flow dataset ready"
        );

        Ok(Self { issues, flow })
    }

    pub fn issues(&self) -> &[IssueRecord] {
        &self.issues
    }

    pub fn flow(&self) -> &[FlowRecord] {
        &self.flow
    }

    /// Earliest and latest close dates in the flow set
    pub fn close_span(&self) -> (NaiveDate, NaiveDate) {
        // flow is non-empty by construction
        let mut closes = self.flow.iter().map(|r| r.close.date());
        let first = closes.next().unwrap_or_default();
        closes.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))
    }

    /// Window spanning every close date
    pub fn default_window(&self) -> DateWindow {
        let (start, end) = self.close_span();
        DateWindow::new(start, end)
    }

    /// Compute metrics, charts and the item table for a window
    pub fn query(&self, window: &DateWindow, charts: &ChartOptions) -> FlowReport {
        let selection = filter_date_range(&self.flow, &self.issues, window);
        let metrics = compute_metrics(
            &selection.flow_in_range,
            &selection.created_in_range,
            window,
        );
        let weekly = weekly_throughput(&selection.flow_in_range);
        let histogram = cycle_time_histogram(&selection.flow_in_range, charts.histogram_bins);

        tracing::debug!(
            window = %window,
            completed = metrics.completed_total,
            bugs_created = metrics.bugs_created,
            "Computed flow report"
        );

        FlowReport {
            window: *window,
            metrics,
            weekly,
            histogram,
            items: selection.completed_by_close_desc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn sample() -> Vec<IssueRecord> {
        vec![
            IssueRecord::new("Story")
                .key("S-1")
                .created(at(1, 1, 9))
                .worked(at(1, 2, 9), at(1, 5, 9)),
            IssueRecord::new("Story")
                .key("S-2")
                .created(at(1, 3, 9))
                .worked(at(1, 8, 9), at(1, 12, 9)),
            IssueRecord::new("Task")
                .key("T-1")
                .created(at(1, 4, 9))
                .worked(at(1, 16, 9), at(1, 20, 9)),
            IssueRecord::new("Bug").key("B-1").created(at(1, 6, 9)),
            IssueRecord::new("Bug").key("B-2").created(at(2, 6, 9)),
        ]
    }

    #[test]
    fn test_no_flow_records_is_an_error() {
        let issues = vec![
            IssueRecord::new("Bug").created(at(1, 1, 9)),
            IssueRecord::new("Story"),
        ];
        assert!(matches!(
            FlowDataset::from_issues(issues),
            Err(FlowError::NoFlowRecords)
        ));
        assert!(matches!(
            FlowDataset::from_issues(Vec::new()),
            Err(FlowError::NoFlowRecords)
        ));
    }

    #[test]
    fn test_default_window_spans_close_dates() {
        let dataset = FlowDataset::from_issues(sample()).unwrap();

        assert_eq!(dataset.close_span(), (date(1, 5), date(1, 20)));
        assert_eq!(dataset.default_window(), DateWindow::new(date(1, 5), date(1, 20)));
        assert_eq!(dataset.issues().len(), 5);
        assert_eq!(dataset.flow().len(), 3);
    }

    #[test]
    fn test_query_full_pass() {
        let dataset = FlowDataset::from_issues(sample()).unwrap();
        let window = DateWindow::new(date(1, 1), date(1, 31));

        let report = dataset.query(&window, &ChartOptions::default());

        assert_eq!(report.metrics.completed_total, 3);
        assert_eq!(report.metrics.days_in_range, 31);
        assert_eq!(report.metrics.bugs_created, 1);
        assert_eq!(report.metrics.defect_density, Some(3.0));
        assert_eq!(report.weekly.as_ref().map(Vec::len), Some(3));
        assert_eq!(report.histogram.as_ref().map(Vec::len), Some(20));

        let keys: Vec<&str> = report
            .items
            .iter()
            .filter_map(|r| r.issue.key.as_deref())
            .collect();
        assert_eq!(keys, vec!["T-1", "S-2", "S-1"]);
    }

    #[test]
    fn test_query_empty_window() {
        let dataset = FlowDataset::from_issues(sample()).unwrap();
        let window = DateWindow::new(date(3, 1), date(3, 31));

        let report = dataset.query(&window, &ChartOptions::default());

        assert_eq!(report.metrics.completed_total, 0);
        assert_eq!(report.metrics.avg_cycle_time_days, 0.0);
        assert_eq!(report.metrics.defect_density, None);
        assert!(report.weekly.is_none());
        assert!(report.histogram.is_none());
        assert!(report.items.is_empty());
    }

    #[test]
    fn test_csv_export_end_to_end() {
        let csv_data = "\
Issue key,Issue Type,Created,Custom field (Start Progress),Custom field (Close Progress)
FLOW-1,Story,01/Jan/24 9:00 AM,02/Jan/24 9:00 AM,10/Jan/24 11:59 PM
FLOW-2,Story,01/Jan/24 9:00 AM,03/Jan/24 9:00 AM,11/Jan/24 12:01 AM
FLOW-3,Task,02/Jan/24 9:00 AM,05/Jan/24 3:00 PM,05/Jan/24 3:00 PM
FLOW-4,Bug,04/Jan/24 9:00 AM,,
FLOW-5,bug,12/Jan/24 9:00 AM,,
FLOW-6,Epic,not a date,01/Jan/24 9:00 AM,
";
        let ingest = crate::IssueCsvReader::new().read_str(csv_data).unwrap();
        assert_eq!(ingest.records.len(), 6);

        let dataset = FlowDataset::from_issues(ingest.records).unwrap();
        let window = DateWindow::new(date(1, 1), date(1, 10));
        let report = dataset.query(&window, &ChartOptions::default());

        let keys: Vec<&str> = report
            .items
            .iter()
            .filter_map(|r| r.issue.key.as_deref())
            .collect();
        assert_eq!(keys, vec!["FLOW-1", "FLOW-3"]);
        assert_eq!(report.items[1].cycle_time_days, 1);
        assert_eq!(report.metrics.stories_done, 1);
        assert_eq!(report.metrics.tasks_done, 1);
        assert_eq!(report.metrics.bugs_created, 1);
        assert_eq!(report.metrics.defect_density, Some(2.0));
        assert_eq!(report.metrics.days_in_range, 10);
        assert_eq!(report.metrics.throughput_per_day, 0.2);
    }

    #[test]
    fn test_queries_are_independent() {
        let dataset = FlowDataset::from_issues(sample()).unwrap();
        let narrow = DateWindow::day(date(1, 5));
        let wide = DateWindow::new(date(1, 1), date(2, 29));

        let first = dataset.query(&wide, &ChartOptions::default());
        let _ = dataset.query(&narrow, &ChartOptions::default());
        let again = dataset.query(&wide, &ChartOptions::default());

        assert_eq!(first.metrics, again.metrics);
        assert_eq!(again.metrics.bugs_created, 2);
    }
}
