//! Booking record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DurationField;

/// An accepted appointment.
///
/// Created only through the conflict-checked create path of the booking
/// store; `datetime` and `booked_on` are immutable afterwards. There is
/// no update operation, corrections go through cancel + recreate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier, derived from the creation timestamp and bumped
    /// past the current maximum so it never repeats.
    pub id: i64,

    /// Service label (e.g. "Swedish Massage")
    pub service: String,

    /// Preferred therapist, if any
    pub requested_therapist: Option<String>,

    /// Raw duration as submitted; scheduling uses its parsed minutes
    pub duration: DurationField,

    /// Quoted price, opaque to scheduling
    pub price: String,

    /// Client gender, opaque to scheduling
    pub gender: String,

    /// Contact phone number
    pub phone: String,

    /// Appointment start instant, normalized to UTC at creation
    pub datetime: DateTime<Utc>,

    /// Aroma oil preference
    pub aroma_oil: Option<String>,

    /// Pressure preference
    pub pressure: Option<String>,

    /// Areas to focus on
    pub focus_area: Option<String>,

    /// Areas to avoid
    pub avoid_area: Option<String>,

    /// When the booking was made
    pub booked_on: DateTime<Utc>,
}

/// Validated fields for a booking that has not yet been admitted.
///
/// Produced by the API layer once required-field presence and datetime
/// parsing have succeeded; the store still owns duration and conflict
/// checks.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service: String,
    pub requested_therapist: Option<String>,
    pub duration: DurationField,
    pub price: String,
    pub gender: String,
    pub phone: String,
    pub datetime: DateTime<Utc>,
    pub aroma_oil: Option<String>,
    pub pressure: Option<String>,
    pub focus_area: Option<String>,
    pub avoid_area: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Booking {
        Booking {
            id: 1700000000000,
            service: "Deep Tissue".to_string(),
            requested_therapist: None,
            duration: DurationField::Text("60min".to_string()),
            price: "100".to_string(),
            gender: "F".to_string(),
            phone: "555-0100".to_string(),
            datetime: "2024-01-01T10:00:00Z".parse().unwrap(),
            aroma_oil: Some("Lavender".to_string()),
            pressure: None,
            focus_area: None,
            avoid_area: None,
            booked_on: "2023-12-20T09:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("requestedTherapist").is_some());
        assert!(json.get("aromaOil").is_some());
        assert!(json.get("bookedOn").is_some());
        assert!(json.get("requested_therapist").is_none());
    }

    #[test]
    fn test_round_trips_through_json() {
        let booking = sample();
        let json = serde_json::to_string(&booking).unwrap();
        let back: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, booking.id);
        assert_eq!(back.datetime, booking.datetime);
        assert_eq!(back.duration, booking.duration);
    }
}
