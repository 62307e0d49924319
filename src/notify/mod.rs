//! Outbound booking alerts.
//!
//! Best-effort delivery to a chat-messaging API: failures are logged and
//! otherwise ignored, and dispatch happens only after the triggering
//! mutation is durable, so a delivery failure never rolls anything back.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NotifierConfig;
use crate::models::Booking;

/// Errors from alert delivery. Always swallowed after logging.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned HTTP {0}")]
    Status(u16),
}

/// What happened to the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    Created,
    Cancelled,
}

/// A destination for booking alerts.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &'static str;

    /// Deliver one alert.
    async fn send(&self, event: BookingEvent, booking: &Booking) -> Result<(), NotifyError>;
}

/// Format the human-readable alert text.
///
/// Presentation fallbacks ("Medium" pressure and friends) live here and
/// only here; the stored record keeps the raw validated fields.
pub fn format_alert(event: BookingEvent, booking: &Booking) -> String {
    let heading = match event {
        BookingEvent::Created => "New booking",
        BookingEvent::Cancelled => "Booking cancelled",
    };
    let therapist = booking
        .requested_therapist
        .as_deref()
        .unwrap_or("Any therapist");
    let pressure = booking.pressure.as_deref().unwrap_or("Medium");
    let oil = booking.aroma_oil.as_deref().unwrap_or("None");

    let mut text = format!(
        "{} #{}\n\
         Service: {}\n\
         When: {}\n\
         Duration: {} min\n\
         Therapist: {}\n\
         Gender: {}\n\
         Phone: {}\n\
         Price: {}\n\
         Pressure: {}\n\
         Aroma oil: {}",
        heading,
        booking.id,
        booking.service,
        booking.datetime.format("%Y-%m-%d %H:%M UTC"),
        booking.duration.parsed_minutes(),
        therapist,
        booking.gender,
        booking.phone,
        booking.price,
        pressure,
        oil,
    );
    if let Some(focus) = &booking.focus_area {
        text.push_str(&format!("\nFocus: {}", focus));
    }
    if let Some(avoid) = &booking.avoid_area {
        text.push_str(&format!("\nAvoid: {}", avoid));
    }
    text
}

/// Chat-API sink (Telegram-style `sendMessage`).
pub struct ChatNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl ChatNotifier {
    pub fn new(config: &NotifierConfig, bot_token: String, chat_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_base: config.api_base.clone(),
            bot_token,
            chat_id,
        }
    }
}

#[async_trait]
impl NotificationSink for ChatNotifier {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn send(&self, event: BookingEvent, booking: &Booking) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": format_alert(event, booking),
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        debug!("Delivered {:?} alert for booking {}", event, booking.id);
        Ok(())
    }
}

/// Sink used when no chat credentials are configured.
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn send(&self, event: BookingEvent, booking: &Booking) -> Result<(), NotifyError> {
        debug!(
            "Notifications disabled, dropping {:?} alert for booking {}",
            event, booking.id
        );
        Ok(())
    }
}

/// Fire-and-forget dispatch. Runs off the request path; a failed send is
/// logged at warn and never reaches the caller.
pub fn dispatch(
    sink: std::sync::Arc<dyn NotificationSink>,
    event: BookingEvent,
    booking: Booking,
) {
    tokio::spawn(async move {
        if let Err(e) = sink.send(event, &booking).await {
            warn!(
                "Failed to deliver {:?} alert for booking {} via {}: {}",
                event,
                booking.id,
                sink.name(),
                e
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationField, NewBooking};
    use chrono::Utc;

    fn sample_booking() -> Booking {
        let new = NewBooking {
            service: "Thai Massage".to_string(),
            requested_therapist: None,
            duration: DurationField::Text("90min".to_string()),
            price: "120".to_string(),
            gender: "M".to_string(),
            phone: "555-0101".to_string(),
            datetime: "2024-03-05T14:00:00Z".parse().unwrap(),
            aroma_oil: None,
            pressure: None,
            focus_area: Some("Shoulders".to_string()),
            avoid_area: None,
        };
        Booking {
            id: 42,
            service: new.service,
            requested_therapist: new.requested_therapist,
            duration: new.duration,
            price: new.price,
            gender: new.gender,
            phone: new.phone,
            datetime: new.datetime,
            aroma_oil: new.aroma_oil,
            pressure: new.pressure,
            focus_area: new.focus_area,
            avoid_area: new.avoid_area,
            booked_on: Utc::now(),
        }
    }

    #[test]
    fn test_alert_applies_presentation_fallbacks() {
        let text = format_alert(BookingEvent::Created, &sample_booking());
        assert!(text.starts_with("New booking #42"));
        assert!(text.contains("Therapist: Any therapist"));
        assert!(text.contains("Pressure: Medium"));
        assert!(text.contains("Aroma oil: None"));
        assert!(text.contains("Duration: 90 min"));
        assert!(text.contains("Focus: Shoulders"));
        assert!(!text.contains("Avoid:"));
    }

    #[test]
    fn test_cancellation_heading() {
        let text = format_alert(BookingEvent::Cancelled, &sample_booking());
        assert!(text.starts_with("Booking cancelled #42"));
    }

    #[tokio::test]
    async fn test_noop_sink_accepts_everything() {
        let sink = NoopSink;
        sink.send(BookingEvent::Created, &sample_booking())
            .await
            .unwrap();
    }
}
