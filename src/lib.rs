//! # Spa Desk
//!
//! Booking-management service for a single-therapist massage studio.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (bookings, testimonials, durations)
//! - **schedule**: Time windows and conflict detection
//! - **store**: Flat-file JSON snapshot persistence
//! - **notify**: Best-effort outbound chat alerts
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod store;

pub use models::*;
