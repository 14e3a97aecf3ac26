//! Issue records and the row normalizer
//!
//! This module defines the typed projection of one exported row:
//! - `RawIssueRow`: the columns the engine reads, looked up by header name
//! - `IssueRecord`: the normalized, immutable record used downstream
//! - `IssueKind`: the closed set of issue types the metrics distinguish

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Header name of the issue type column
pub const COL_ISSUE_TYPE: &str = "Issue Type";
/// Header name of the creation timestamp column
pub const COL_CREATED: &str = "Created";
/// Header name of the work-started timestamp column
pub const COL_START: &str = "Custom field (Start Progress)";
/// Header name of the work-completed timestamp column
pub const COL_CLOSE: &str = "Custom field (Close Progress)";

/// Timestamp layout of the export, e.g. `22/Dec/25 12:00 AM`
pub const JIRA_TIMESTAMP_FORMAT: &str = "%d/%b/%y %I:%M %p";

/// First year chrono produces for `%y` that reads as 19xx elsewhere
const LAST_PIVOT_YEAR: i32 = 2069;

/// Classification of an issue for metric counting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Story,
    Task,
    Bug,
    /// Any other label (epics, sub-tasks, ...). Counted in totals only.
    Other,
}

impl IssueKind {
    /// Fold a free-form type label into a kind (case-insensitive exact match)
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "story" => Self::Story,
            "task" => Self::Task,
            "bug" => Self::Bug,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One exported row, restricted to the columns the engine consumes
///
/// Missing columns and empty cells both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawIssueRow {
    #[serde(rename = "Issue key", default)]
    pub key: Option<String>,
    #[serde(rename = "Summary", default)]
    pub summary: Option<String>,
    #[serde(rename = "Issue Type", default)]
    pub issue_type: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Project name", default)]
    pub project: Option<String>,
    #[serde(rename = "Created", default)]
    pub created: Option<String>,
    #[serde(rename = "Custom field (Start Progress)", default)]
    pub start: Option<String>,
    #[serde(rename = "Custom field (Close Progress)", default)]
    pub close: Option<String>,
}

/// A normalized issue record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IssueRecord {
    /// Issue key (passthrough)
    pub key: Option<String>,
    /// Summary (passthrough)
    pub summary: Option<String>,
    /// Trimmed type label, case preserved
    pub issue_type: String,
    /// Type folded once at ingestion
    pub kind: IssueKind,
    /// Workflow status (passthrough)
    pub status: Option<String>,
    /// Project name (passthrough)
    pub project: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub start: Option<NaiveDateTime>,
    pub close: Option<NaiveDateTime>,
}

impl IssueRecord {
    /// Create a record with the given type label and no timestamps
    pub fn new(issue_type: impl Into<String>) -> Self {
        let issue_type: String = issue_type.into();
        let issue_type = issue_type.trim().to_string();
        Self {
            key: None,
            summary: None,
            kind: IssueKind::from_label(&issue_type),
            issue_type,
            status: None,
            project: None,
            created: None,
            start: None,
            close: None,
        }
    }

    /// Builder: set the issue key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Builder: set the creation timestamp
    pub fn created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    /// Builder: set start and close timestamps
    pub fn worked(mut self, start: NaiveDateTime, close: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.close = Some(close);
        self
    }

    /// Normalize a raw row. Never fails: bad timestamps become `None`.
    pub fn from_raw(raw: RawIssueRow) -> Self {
        let issue_type = raw
            .issue_type
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Self {
            kind: IssueKind::from_label(&issue_type),
            issue_type,
            key: raw.key,
            summary: raw.summary,
            status: raw.status,
            project: raw.project,
            created: raw.created.as_deref().and_then(parse_jira_timestamp),
            start: raw.start.as_deref().and_then(parse_jira_timestamp),
            close: raw.close.as_deref().and_then(parse_jira_timestamp),
        }
    }
}

/// Parse a timestamp in the export's fixed layout
///
/// Returns `None` for anything that does not match; month and AM/PM are
/// matched case-insensitively.
pub fn parse_jira_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = NaiveDateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT).ok()?;

    // %y 69..=99 is 19xx (POSIX pivot); chrono maps 69 to 2069
    if parsed.year() >= LAST_PIVOT_YEAR {
        return parsed.with_year(parsed.year() - 100);
    }
    Some(parsed)
}

/// Normalize a batch of raw rows, preserving order and count
pub fn normalize_rows(rows: impl IntoIterator<Item = RawIssueRow>) -> Vec<IssueRecord> {
    rows.into_iter().map(IssueRecord::from_raw).collect()
}
