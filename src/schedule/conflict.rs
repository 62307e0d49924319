//! Conflict detection over the stored booking collection.

use crate::models::Booking;

use super::TimeWindow;

/// Find the first stored booking whose window overlaps `candidate`.
///
/// Returns the conflicting booking's id. Short-circuits on the first
/// hit; the overlap predicate is commutative, so iteration order does
/// not change whether a conflict is reported.
pub fn find_conflict(existing: &[Booking], candidate: &TimeWindow) -> Option<i64> {
    existing
        .iter()
        .find(|b| TimeWindow::of_booking(b).overlaps(candidate))
        .map(|b| b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationField;
    use chrono::{DateTime, Utc};

    fn booking(id: i64, datetime: &str, minutes: i64) -> Booking {
        Booking {
            id,
            service: "Massage".to_string(),
            requested_therapist: None,
            duration: DurationField::Minutes(minutes),
            price: "100".to_string(),
            gender: "F".to_string(),
            phone: "555".to_string(),
            datetime: datetime.parse().unwrap(),
            aroma_oil: None,
            pressure: None,
            focus_area: None,
            avoid_area: None,
            booked_on: Utc::now(),
        }
    }

    fn window(datetime: &str, minutes: i64) -> TimeWindow {
        let start: DateTime<Utc> = datetime.parse().unwrap();
        TimeWindow::starting_at(start, minutes).unwrap()
    }

    #[test]
    fn test_empty_store_never_conflicts() {
        assert_eq!(
            find_conflict(&[], &window("2024-01-01T10:00:00Z", 60)),
            None
        );
    }

    #[test]
    fn test_overlap_reports_conflicting_id() {
        let existing = vec![booking(7, "2024-01-01T10:00:00Z", 60)];
        assert_eq!(
            find_conflict(&existing, &window("2024-01-01T10:30:00Z", 30)),
            Some(7)
        );
    }

    #[test]
    fn test_back_to_back_is_allowed() {
        let existing = vec![booking(7, "2024-01-01T10:00:00Z", 60)];
        assert_eq!(
            find_conflict(&existing, &window("2024-01-01T11:00:00Z", 30)),
            None
        );
        assert_eq!(
            find_conflict(&existing, &window("2024-01-01T09:30:00Z", 30)),
            None
        );
    }

    #[test]
    fn test_first_conflict_wins() {
        let existing = vec![
            booking(1, "2024-01-01T09:00:00Z", 60),
            booking(2, "2024-01-01T10:00:00Z", 60),
            booking(3, "2024-01-01T11:00:00Z", 60),
        ];
        // Candidate spans bookings 2 and 3; the scan stops at 2.
        assert_eq!(
            find_conflict(&existing, &window("2024-01-01T10:30:00Z", 90)),
            Some(2)
        );
    }

    #[test]
    fn test_text_duration_is_resolved() {
        let mut b = booking(1, "2024-01-01T10:00:00Z", 0);
        b.duration = DurationField::Text("60min".to_string());
        assert_eq!(
            find_conflict(&[b], &window("2024-01-01T10:45:00Z", 30)),
            Some(1)
        );
    }
}
