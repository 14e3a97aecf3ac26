//! Error types for the flow metrics engine
//!
//! Only conditions that stop a query are errors. Unparseable timestamps and
//! missing columns resolve to absent values and never surface here.

use thiserror::Error;

/// Errors that can occur while loading or querying a dataset
#[derive(Error, Debug)]
pub enum FlowError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer could not be read at all (bad header, unreadable file)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No record carries both a valid start and close timestamp
    #[error("No items with valid Start Progress and Close Progress to compute flow metrics")]
    NoFlowRecords,
}

/// Result type alias for flow operations
pub type FlowResult<T> = Result<T, FlowError>;
