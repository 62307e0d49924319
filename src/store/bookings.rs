//! The booking store: sole owner of the booking collection.
//!
//! Every mutation runs check-then-mutate-then-persist under the caller's
//! write guard, so two concurrent creates can never both pass the
//! conflict scan. A failed snapshot write rolls the in-memory mutation
//! back before the error is returned; memory and disk never diverge on a
//! reported failure.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::models::{Booking, NewBooking};
use crate::schedule::{find_conflict, TimeWindow};

use super::{snapshot, StoreError, StorePaths};

pub struct BookingStore {
    path: PathBuf,
    bookings: Vec<Booking>,
    /// Highest id ever handed out this process; ids are never reused
    /// even after the booking holding the maximum is cancelled.
    last_id: i64,
}

impl BookingStore {
    /// Load the store from its snapshot file. Missing or corrupt
    /// snapshots start the store empty.
    pub fn load(paths: &StorePaths) -> Self {
        let path = paths.bookings_file();
        let bookings: Vec<Booking> = snapshot::load_or_empty(&path);
        let last_id = bookings.iter().map(|b| b.id).max().unwrap_or(0);
        info!("Loaded {} bookings from {:?}", bookings.len(), path);
        Self {
            path,
            bookings,
            last_id,
        }
    }

    /// Admit a booking if its time window is free.
    ///
    /// Rejects unparsable (zero-minute) durations before the conflict
    /// scan; a zero-length window would never conflict and would poison
    /// the no-overlap invariant.
    pub fn create(&mut self, new: NewBooking) -> Result<Booking, StoreError> {
        let minutes = new.duration.parsed_minutes();
        if minutes <= 0 {
            return Err(StoreError::UnparsableDuration);
        }

        let candidate = TimeWindow::starting_at(new.datetime, minutes)
            .ok_or(StoreError::DurationOutOfRange(minutes))?;
        if let Some(with) = find_conflict(&self.bookings, &candidate) {
            return Err(StoreError::Conflict { with });
        }

        let booking = Booking {
            id: self.next_id(),
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
        };

        self.bookings.push(booking.clone());
        if let Err(e) = snapshot::write_array(&self.path, &self.bookings) {
            self.bookings.pop();
            return Err(e.into());
        }

        info!(
            "Booked {} at {} for {}min (id {})",
            booking.service, booking.datetime, minutes, booking.id
        );
        Ok(booking)
    }

    /// All bookings in insertion order.
    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    /// Remove a booking by id, returning the removed record.
    pub fn cancel(&mut self, id: i64) -> Result<Booking, StoreError> {
        let idx = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.bookings.remove(idx);
        if let Err(e) = snapshot::write_array(&self.path, &self.bookings) {
            self.bookings.insert(idx, removed);
            return Err(e.into());
        }

        info!("Cancelled booking {} ({})", id, removed.service);
        Ok(removed)
    }

    fn next_id(&mut self) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        self.last_id = candidate.max(self.last_id + 1);
        self.last_id
    }
}
