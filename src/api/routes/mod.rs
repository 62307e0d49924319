pub mod bookings;
pub mod testimonials;
