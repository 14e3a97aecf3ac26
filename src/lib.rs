//! # jira-flow
//!
//! Flow metrics for Jira CSV exports: cycle time, throughput and defect
//! density over a date window, plus chart-ready weekly and histogram tables.
//!
//! ## Modules
//!
//! - [`ingest`]: CSV reading and record normalization
//! - [`flow`]: flow items, cycle time and the date-range filter
//! - [`metrics`]: scalar KPIs and chart aggregations
//! - [`report`]: dataset snapshot, per-window query pass and rendering
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_flow::{ChartOptions, FlowDataset, IssueCsvReader};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ingest = IssueCsvReader::new().read_path(Path::new("JIRA.csv"))?;
//!     let dataset = FlowDataset::from_issues(ingest.records)?;
//!
//!     let window = dataset.default_window();
//!     let report = dataset.query(&window, &ChartOptions::default());
//!
//!     println!(
//!         "{} items completed, {:.2} per week",
//!         report.metrics.completed_total, report.metrics.throughput_per_week
//!     );
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod ingest;
pub mod metrics;
pub mod report;

// Re-export top-level types for convenience
pub use error::{FlowError, FlowResult};

pub use ingest::{
    normalize_rows, parse_jira_timestamp, IngestResult, IssueCsvReader, IssueKind, IssueRecord,
    RawIssueRow,
};

pub use flow::{build_flow, cycle_time_days, filter_date_range, DateWindow, FlowRecord, RangeSelection};

pub use metrics::{
    compute_metrics, cycle_time_histogram, weekly_throughput, HistogramBin, KindCounts,
    MetricsResult, WeeklyCount,
};

pub use report::{render, ChartOptions, FlowDataset, FlowReport, OutputFormat};

pub use config::{generate_default_config, Config, ConfigError, MAX_HISTOGRAM_BINS};
