use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Booking, DurationField, NewBooking};
use crate::notify::{self, BookingEvent};

/// Incoming booking request. Every field is optional at the wire level
/// so that a missing required field surfaces as a 400, not an extractor
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service: Option<String>,
    pub requested_therapist: Option<String>,
    pub duration: Option<DurationField>,
    /// Accepted as a number or a string; stored as text, opaque to
    /// scheduling either way.
    pub price: Option<serde_json::Value>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub datetime: Option<String>,
    pub aroma_oil: Option<String>,
    pub pressure: Option<String>,
    pub focus_area: Option<String>,
    pub avoid_area: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub message: String,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::BadRequest(format!(
            "missing required field: {}",
            name
        ))),
    }
}

fn required_price(value: Option<serde_json::Value>) -> Result<String, ApiError> {
    match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ApiError::BadRequest(
            "missing required field: price".to_string(),
        )),
    }
}

/// Parse the client-submitted start instant and normalize it to UTC.
fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::BadRequest(format!(
                "datetime {:?} is not a valid RFC 3339 instant",
                raw
            ))
        })
}

impl BookingRequest {
    fn validate(self) -> Result<NewBooking, ApiError> {
        let datetime_raw = required(self.datetime, "datetime")?;
        Ok(NewBooking {
            service: required(self.service, "service")?,
            requested_therapist: self.requested_therapist,
            duration: self
                .duration
                .ok_or_else(|| ApiError::BadRequest("missing required field: duration".into()))?,
            price: required_price(self.price)?,
            gender: required(self.gender, "gender")?,
            phone: required(self.phone, "phone")?,
            datetime: parse_datetime(&datetime_raw)?,
            aroma_oil: self.aroma_oil,
            pressure: self.pressure,
            focus_area: self.focus_area,
            avoid_area: self.avoid_area,
        })
    }
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let new = request.validate()?;

    let booking = {
        let mut store = state.bookings.write().await;
        store.create(new)?
    };

    // The booking is durable at this point; delivery failure is the
    // sink's problem, never the caller's.
    notify::dispatch(state.notifier.clone(), BookingEvent::Created, booking.clone());

    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    let store = state.bookings.read().await;
    Json(store.list().to_vec())
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let removed = {
        let mut store = state.bookings.write().await;
        store.cancel(id)?
    };

    notify::dispatch(state.notifier.clone(), BookingEvent::Cancelled, removed);

    Ok(Json(ConfirmationResponse {
        message: format!("Booking {} cancelled", id),
    }))
}
