//! Record Normalizer
//!
//! Turns exported rows into typed, immutable issue records:
//!
//! - **record**: `IssueRecord`, `IssueKind`, timestamp parsing
//! - **csv_reader**: reads a Jira CSV export into records
//!
//! Normalization never drops a row. A timestamp that is missing or does not
//! match the export layout (`22/Dec/25 12:00 AM`) becomes `None` and is
//! excluded later by whichever filter needs it.

mod csv_reader;
mod record;

pub use csv_reader::{IngestResult, IssueCsvReader};
pub use record::{
    normalize_rows, parse_jira_timestamp, IssueKind, IssueRecord, RawIssueRow, COL_CLOSE,
    COL_CREATED, COL_ISSUE_TYPE, COL_START, JIRA_TIMESTAMP_FORMAT,
};
