//! Client testimonial model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A client review. No scheduling semantics; only field presence and
/// the rating bounds are enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Unique identifier, same timestamp-derived scheme as bookings
    pub id: i64,

    pub reviewer_name: String,

    pub reviewer_email: String,

    pub review_title: Option<String>,

    pub review_text: String,

    /// Star rating, 1 through 5 inclusive
    pub rating: u8,

    /// Whether the reviewer confirmed this is their genuine opinion
    pub genuine_opinion: bool,

    /// When the testimonial was submitted
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let t = Testimonial {
            id: 1,
            reviewer_name: "Ana".to_string(),
            reviewer_email: "ana@example.com".to_string(),
            review_title: None,
            review_text: "Great".to_string(),
            rating: 5,
            genuine_opinion: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("reviewerName").is_some());
        assert!(json.get("genuineOpinion").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
