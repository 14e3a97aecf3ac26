//! Range Filter
//!
//! Applies a date window with two different meanings:
//! - completed work: flow items whose **close** falls in the window
//! - created work: all issues whose **created** falls in the window
//!
//! Both inputs are borrowed and never modified; the selection owns copies.

use super::builder::FlowRecord;
use super::window::DateWindow;
use crate::ingest::IssueRecord;

/// The two record sets a window selects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSelection {
    /// Flow items closed within the window
    pub flow_in_range: Vec<FlowRecord>,
    /// Issues created within the window, regardless of flow validity
    pub created_in_range: Vec<IssueRecord>,
}

impl RangeSelection {
    /// Flow items ordered by close, most recent first
    pub fn completed_by_close_desc(&self) -> Vec<FlowRecord> {
        let mut items = self.flow_in_range.clone();
        items.sort_by(|a, b| b.close.cmp(&a.close));
        items
    }
}

/// Flow items whose close timestamp falls within the window
pub fn completed_in_window(flow: &[FlowRecord], window: &DateWindow) -> Vec<FlowRecord> {
    flow.iter()
        .filter(|r| window.contains(r.close))
        .cloned()
        .collect()
}

/// Issues whose creation timestamp falls within the window
pub fn created_in_window(issues: &[IssueRecord], window: &DateWindow) -> Vec<IssueRecord> {
    issues
        .iter()
        .filter(|r| window.contains_opt(r.created))
        .cloned()
        .collect()
}

/// Select completed and created work for a window
pub fn filter_date_range(
    flow: &[FlowRecord],
    issues: &[IssueRecord],
    window: &DateWindow,
) -> RangeSelection {
    let selection = RangeSelection {
        flow_in_range: completed_in_window(flow, window),
        created_in_range: created_in_window(issues, window),
    };

    tracing::debug!(
        window = %window,
        completed = selection.flow_in_range.len(),
        created = selection.created_in_range.len(),
        "Filtered date range"
    );

    selection
}
