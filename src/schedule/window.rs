//! Half-open time windows in epoch milliseconds.

use chrono::{DateTime, Utc};

use crate::models::Booking;

/// Milliseconds per minute.
const MINUTE_MS: i64 = 60_000;

/// The half-open interval `[start, end)` a booking occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive start, epoch milliseconds
    pub start: i64,
    /// Exclusive end, epoch milliseconds
    pub end: i64,
}

impl TimeWindow {
    /// Window starting at `start` and lasting `minutes`.
    ///
    /// `None` when the end instant is not representable in epoch
    /// milliseconds; callers must reject such a booking outright, since
    /// a wrapped end would invert the window and dodge every conflict.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Option<Self> {
        let start_ms = start.timestamp_millis();
        let end = minutes.checked_mul(MINUTE_MS)?.checked_add(start_ms)?;
        Some(Self {
            start: start_ms,
            end,
        })
    }

    /// Window of an already-stored booking, saturating at the
    /// representable range. Admission goes through the checked
    /// constructor, so stored bookings are always exact.
    pub fn of_booking(booking: &Booking) -> Self {
        let start = booking.datetime.timestamp_millis();
        let end = booking
            .duration
            .parsed_minutes()
            .saturating_mul(MINUTE_MS)
            .saturating_add(start);
        Self { start, end }
    }

    /// Strict interval overlap. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn window(s: &str, minutes: i64) -> TimeWindow {
        TimeWindow::starting_at(utc(s), minutes).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let w = window("2024-01-01T10:00:00Z", 60);
        assert_eq!(w.end - w.start, 60 * MINUTE_MS);
    }

    #[test]
    fn test_overlapping_windows() {
        let a = window("2024-01-01T10:00:00Z", 60);
        let b = window("2024-01-01T10:30:00Z", 30);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = window("2024-01-01T10:00:00Z", 60);
        let b = window("2024-01-01T11:00:00Z", 30);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_window_overlaps() {
        let outer = window("2024-01-01T10:00:00Z", 120);
        let inner = window("2024-01-01T10:30:00Z", 30);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_disjoint_windows() {
        let a = window("2024-01-01T10:00:00Z", 60);
        let b = window("2024-01-01T13:00:00Z", 60);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_unrepresentable_end_is_rejected() {
        assert_eq!(
            TimeWindow::starting_at(utc("2024-01-01T10:00:00Z"), i64::MAX),
            None
        );
        assert_eq!(
            TimeWindow::starting_at(utc("2024-01-01T10:00:00Z"), i64::MAX / MINUTE_MS),
            None
        );
    }
}
