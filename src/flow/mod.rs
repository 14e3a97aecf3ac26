//! Flow derivation
//!
//! - **builder**: flow items (start and close present) and their cycle time
//! - **window**: inclusive calendar-day windows
//! - **range**: the completed-by-close / created-by-created window filter
//!
//! # Pipeline
//!
//! ```text
//! IssueRecord[] → build_flow → FlowRecord[]
//!                                   │
//! IssueRecord[] ──────────────┐     │
//!                             ▼     ▼
//!                      filter_date_range(window) → RangeSelection
//! ```

mod builder;
mod range;
mod window;

pub use builder::{build_flow, cycle_time_days, FlowRecord};
pub use range::{completed_in_window, created_in_window, filter_date_range, RangeSelection};
pub use window::DateWindow;
