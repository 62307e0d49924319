//! Core data models for the booking service.

mod booking;
mod duration;
mod testimonial;

pub use booking::*;
pub use duration::*;
pub use testimonial::*;
