//! Loosely-typed booking duration.
//!
//! Clients submit duration either as a bare number of minutes or as
//! free text ("60min", "about 90 minutes"). The ambiguity is resolved
//! exactly once, through [`DurationField::parsed_minutes`]; nothing
//! downstream ever re-interprets the raw value.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

/// Duration as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    /// Already a number; treated as minutes, taken unchanged.
    Minutes(i64),
    /// Free text; the first contiguous digit run is the minute count.
    Text(String),
}

impl DurationField {
    /// Resolve the raw value to whole minutes.
    ///
    /// Returns `0` when no number can be extracted. Zero is a sentinel
    /// meaning "unparsable" and callers must reject it: a zero-length
    /// window would never conflict with anything.
    pub fn parsed_minutes(&self) -> i64 {
        match self {
            DurationField::Minutes(n) => *n,
            DurationField::Text(s) => digit_run()
                .find(s)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_minutes_unchanged() {
        assert_eq!(DurationField::Minutes(60).parsed_minutes(), 60);
        assert_eq!(DurationField::Minutes(0).parsed_minutes(), 0);
    }

    #[test]
    fn test_text_with_suffix() {
        assert_eq!(
            DurationField::Text("60min".to_string()).parsed_minutes(),
            60
        );
        assert_eq!(
            DurationField::Text("90 minutes".to_string()).parsed_minutes(),
            90
        );
    }

    #[test]
    fn test_text_with_prefix() {
        assert_eq!(
            DurationField::Text("about 45".to_string()).parsed_minutes(),
            45
        );
    }

    #[test]
    fn test_first_digit_run_wins() {
        assert_eq!(
            DurationField::Text("60 or 90".to_string()).parsed_minutes(),
            60
        );
    }

    #[test]
    fn test_no_digits_is_zero() {
        assert_eq!(DurationField::Text("abc".to_string()).parsed_minutes(), 0);
        assert_eq!(DurationField::Text(String::new()).parsed_minutes(), 0);
    }

    #[test]
    fn test_untagged_deserialization() {
        let n: DurationField = serde_json::from_str("60").unwrap();
        assert_eq!(n, DurationField::Minutes(60));

        let s: DurationField = serde_json::from_str("\"60min\"").unwrap();
        assert_eq!(s, DurationField::Text("60min".to_string()));
    }
}
