//! CSV Reader
//!
//! Reads a Jira CSV export into normalized issue records.
//! Columns are matched by header name; every other column is ignored.

use super::record::{IssueRecord, RawIssueRow};
use crate::error::FlowResult;
use std::io::Read;
use std::path::Path;

/// Maximum number of row errors kept in an `IngestResult`
const MAX_REPORTED_ERRORS: usize = 100;

/// Jira CSV reader
#[derive(Debug, Clone)]
pub struct IssueCsvReader {
    /// Field delimiter
    delimiter: u8,
}

/// Result of reading one export
#[derive(Debug)]
pub struct IngestResult {
    pub records: Vec<IssueRecord>,
    pub rows_read: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl Default for IssueCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueCsvReader {
    /// Create a reader for comma-separated exports
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read an export from a file
    pub fn read_path(&self, path: &Path) -> FlowResult<IngestResult> {
        tracing::debug!(path = ?path, "Reading issue export");
        let file = std::fs::File::open(path)?;
        self.read_from(file)
    }

    /// Read an export from a string (useful for testing)
    pub fn read_str(&self, csv_data: &str) -> FlowResult<IngestResult> {
        self.read_from(csv_data.as_bytes())
    }

    /// Read an export from any byte source
    pub fn read_from<R: Read>(&self, source: R) -> FlowResult<IngestResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(source);

        // Surface an unreadable header as a hard error before touching rows
        reader.headers()?;

        let mut records = Vec::new();
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.deserialize::<RawIssueRow>().enumerate() {
            match result {
                Ok(raw) => records.push(IssueRecord::from_raw(raw)),
                Err(e) => {
                    // header is line 1
                    let line = line_num + 2;
                    tracing::warn!(line, error = %e, "Skipping undecodable CSV row");
                    errors.push(format!("Line {}: {}", line, e));
                    rows_failed += 1;
                }
            }
        }

        if errors.len() > MAX_REPORTED_ERRORS {
            let total = errors.len();
            errors.truncate(MAX_REPORTED_ERRORS);
            errors.push(format!("... and {} more errors", total - MAX_REPORTED_ERRORS));
        }

        let rows_read = records.len();
        tracing::debug!(rows_read, rows_failed, "Issue export read");

        Ok(IngestResult {
            records,
            rows_read,
            rows_failed,
            errors,
        })
    }
}
