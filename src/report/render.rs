//! Report rendering
//!
//! Text and JSON views of a `FlowReport`. Absent values render as explicit
//! "no data" captions, never as zero.

use super::dataset::FlowReport;
use serde::Deserialize;
use std::fmt::Write;

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M";

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the given format
pub fn render(report: &FlowReport, format: OutputFormat, show_items: bool) -> String {
    match format {
        OutputFormat::Table => render_table(report, show_items),
        OutputFormat::Json => render_json(report),
    }
}

/// Serialize the whole report as pretty JSON
pub fn render_json(report: &FlowReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Human-readable report
pub fn render_table(report: &FlowReport, show_items: bool) -> String {
    let m = &report.metrics;
    let mut out = String::new();

    // writes into a String are infallible
    let _ = writeln!(out, "Flow report {} ({} days)", report.window, m.days_in_range);
    let _ = writeln!(out, "{}", "-".repeat(48));
    let _ = writeln!(out, "{:<32} {}", "Completed items", m.completed_total);
    let _ = writeln!(out, "{:<32} {:.2}", "Throughput (items/day)", m.throughput_per_day);
    let _ = writeln!(out, "{:<32} {:.2}", "Throughput (items/week)", m.throughput_per_week);
    let _ = writeln!(out, "{:<32} {:.2}", "Average cycle time (days)", m.avg_cycle_time_days);
    let _ = writeln!(out, "{:<32} {}", "Stories done", m.stories_done);
    let _ = writeln!(out, "{:<32} {}", "Tasks done", m.tasks_done);
    let _ = writeln!(out, "{:<32} {}", "Bugs done", m.bugs_done);
    let _ = writeln!(out, "{:<32} {}", "Bugs created (in range)", m.bugs_created);

    match m.defect_density {
        Some(density) => {
            let _ = writeln!(
                out,
                "{:<32} {:.2}  ((stories + tasks) / bugs created)",
                "Defect density", density
            );
        }
        None => {
            let _ = writeln!(
                out,
                "{:<32} undefined (no bugs created in range)",
                "Defect density"
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Throughput per week");
    match &report.weekly {
        Some(series) => {
            for week in series {
                let _ = writeln!(out, "  {}  {:>4}", week.week_start, week.completed);
            }
        }
        None => {
            let _ = writeln!(out, "  no data for throughput chart");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Cycle time distribution (days)");
    match &report.histogram {
        Some(bins) => {
            for bin in bins.iter().filter(|b| b.count > 0) {
                let _ = writeln!(
                    out,
                    "  {:>7.2} - {:<7.2} {:>4}",
                    bin.lower, bin.upper, bin.count
                );
            }
        }
        None => {
            let _ = writeln!(out, "  no data for cycle time chart");
        }
    }

    if show_items {
        let _ = writeln!(out);
        render_items(&mut out, report);
    }

    out
}

fn render_items(out: &mut String, report: &FlowReport) {
    let _ = writeln!(
        out,
        "{:<12} | {:<30} | {:<8} | {:<16} | {:<16} | {:>5} | {:<12} | {}",
        "Key", "Summary", "Type", "Start", "Close", "Days", "Status", "Project"
    );
    let _ = writeln!(out, "{}", "-".repeat(130));

    for item in &report.items {
        let issue = &item.issue;
        let _ = writeln!(
            out,
            "{:<12} | {:<30} | {:<8} | {:<16} | {:<16} | {:>5} | {:<12} | {}",
            issue.key.as_deref().unwrap_or("-"),
            truncate(issue.summary.as_deref().unwrap_or("-"), 30),
            issue.issue_type,
            item.start.format(TIMESTAMP_DISPLAY).to_string(),
            item.close.format(TIMESTAMP_DISPLAY).to_string(),
            item.cycle_time_days,
            issue.status.as_deref().unwrap_or("-"),
            issue.project.as_deref().unwrap_or("-"),
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::DateWindow;
    use crate::ingest::IssueRecord;
    use crate::report::{ChartOptions, FlowDataset};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn window(start: u32, end: u32) -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, end).unwrap(),
        )
    }

    fn dataset() -> FlowDataset {
        FlowDataset::from_issues(vec![
            IssueRecord {
                summary: Some("A rather long summary that will not fit the column".to_string()),
                ..IssueRecord::new("Story").key("S-1").worked(at(2, 9), at(5, 9))
            },
            IssueRecord::new("Task").key("T-1").worked(at(3, 9), at(9, 9)),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_marks_undefined_density() {
        let report = dataset().query(&window(1, 14), &ChartOptions::default());
        let text = render_table(&report, false);

        assert!(text.contains(&format!("{:<32} {}", "Completed items", 2)));
        assert!(text.contains("undefined (no bugs created in range)"));
        assert!(!text.contains("Key"));
    }

    #[test]
    fn test_table_no_data_captions() {
        let report = dataset().query(&window(20, 25), &ChartOptions::default());
        let text = render_table(&report, true);

        assert!(text.contains("no data for throughput chart"));
        assert!(text.contains("no data for cycle time chart"));
    }

    #[test]
    fn test_table_items_newest_first() {
        let report = dataset().query(&window(1, 14), &ChartOptions::default());
        let text = render_table(&report, true);

        let t1 = text.find("T-1").unwrap();
        let s1 = text.find("S-1").unwrap();
        assert!(t1 < s1);
        assert!(text.contains("A rather long summary that ..."));
    }

    #[test]
    fn test_json_nulls_for_absent_values() {
        let report = dataset().query(&window(20, 25), &ChartOptions::default());
        let json: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();

        assert!(json["metrics"]["defect_density"].is_null());
        assert!(json["weekly"].is_null());
        assert!(json["histogram"].is_null());
        assert_eq!(json["metrics"]["completed_total"], 0);
    }

    #[test]
    fn test_json_items_carry_cycle_time() {
        let report = dataset().query(&window(1, 14), &ChartOptions::default());
        let json: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();

        assert_eq!(json["items"][0]["key"], "T-1");
        assert_eq!(json["items"][0]["cycle_time_days"], 6);
        assert_eq!(json["items"][0]["kind"], "task");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("xml"), None);
    }
}
