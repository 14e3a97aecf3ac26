//! Flow reports
//!
//! - **dataset**: `FlowDataset` snapshot and the per-window query pass
//! - **render**: table and JSON output
//!
//! # Query Pass
//!
//! ```text
//! FlowDataset ─ window ─▶ filter_date_range ─▶ compute_metrics
//!                                            ├▶ weekly_throughput
//!                                            ├▶ cycle_time_histogram
//!                                            └▶ items (close desc)
//! ```

mod dataset;
mod render;

pub use dataset::{ChartOptions, FlowDataset, FlowReport};
pub use render::{render, render_json, render_table, OutputFormat};
