//! Delivery metrics
//!
//! - **aggregator**: throughput, average cycle time, per-type counts, defect density
//! - **charts**: weekly completed-count series and cycle-time histogram
//!
//! All functions are pure over a `RangeSelection`'s two sets.

mod aggregator;
mod charts;

pub use aggregator::{compute_metrics, defect_density, KindCounts, MetricsResult};
pub use charts::{
    cycle_time_histogram, week_start, weekly_throughput, HistogramBin, WeeklyCount,
    DEFAULT_HISTOGRAM_BINS,
};
