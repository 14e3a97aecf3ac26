//! Date windows
//!
//! A `DateWindow` is an inclusive interval of calendar days. It matches
//! instants in the half-open range `[start 00:00, end + 1 day 00:00)`, so the
//! whole end day is included whatever the time of day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Inclusive calendar-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window. `end < start` is allowed and matches nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// First matching instant
    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// First instant after the window, `None` when `end` is the last
    /// representable day
    pub fn end_exclusive(&self) -> Option<NaiveDateTime> {
        self.end.succ_opt().map(|next| next.and_time(NaiveTime::MIN))
    }

    /// Check if an instant falls within this window
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start_bound() && self.end_exclusive().map_or(true, |end| instant < end)
    }

    /// Check if an optional instant falls within this window
    pub fn contains_opt(&self, instant: Option<NaiveDateTime>) -> bool {
        instant.is_some_and(|i| self.contains(i))
    }

    /// Inclusive day count, never below 1
    pub fn days_inclusive(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// True when `end < start`
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_window_contains_whole_end_day() {
        let window = DateWindow::new(date(1, 1), date(1, 10));

        assert!(window.contains(date(1, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(window.contains(date(1, 10).and_hms_opt(23, 59, 0).unwrap()));
        assert!(!window.contains(date(1, 11).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!window.contains(date(1, 11).and_hms_opt(0, 1, 0).unwrap()));
        assert!(!window.contains(date(1, 1).and_hms_opt(0, 0, 0).unwrap() - Duration::minutes(1)));
    }

    #[test]
    fn test_window_contains_opt() {
        let window = DateWindow::day(date(3, 5));
        assert!(!window.contains_opt(None));
        assert!(window.contains_opt(date(3, 5).and_hms_opt(12, 0, 0)));
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(DateWindow::new(date(1, 1), date(1, 15)).days_inclusive(), 15);
        assert_eq!(DateWindow::day(date(1, 1)).days_inclusive(), 1);
        // reversed windows still yield a usable divisor
        assert_eq!(DateWindow::new(date(1, 10), date(1, 1)).days_inclusive(), 1);
    }

    #[test]
    fn test_window_ending_on_last_representable_day() {
        let window = DateWindow::new(date(1, 1), NaiveDate::MAX);

        assert_eq!(window.end_exclusive(), None);
        assert!(window.contains(date(1, 2).and_hms_opt(0, 0, 0).unwrap()));
        assert!(window.contains(NaiveDateTime::MAX));
        assert!(!window.contains(date(1, 1).and_hms_opt(0, 0, 0).unwrap() - Duration::minutes(1)));
        assert!(window.days_inclusive() > 1);
    }

    #[test]
    fn test_end_exclusive_is_next_midnight() {
        let window = DateWindow::day(date(2, 29));
        assert_eq!(window.end_exclusive(), date(3, 1).and_hms_opt(0, 0, 0));
    }

    #[test]
    fn test_reversed_window_matches_nothing() {
        let window = DateWindow::new(date(1, 10), date(1, 1));
        assert!(window.is_empty());
        assert!(!window.contains(date(1, 5).and_hms_opt(12, 0, 0).unwrap()));
        assert!(!window.contains(date(1, 10).and_hms_opt(0, 0, 0).unwrap()));
    }
}
