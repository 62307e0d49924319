//! Scheduling logic: time windows and conflict detection.
//!
//! A booking occupies the half-open window `[start, start + duration)`.
//! Two bookings conflict when their windows strictly overlap; windows
//! that merely touch at an endpoint do not, so back-to-back appointments
//! are allowed.

mod conflict;
mod window;

pub use conflict::*;
pub use window::*;
