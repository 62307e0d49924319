//! Flat-file stores for bookings and testimonials.
//!
//! Each collection is persisted as a single JSON array snapshot that is
//! fully rewritten on every mutation and fully loaded at startup. The
//! stores own their collections exclusively; mutations are serialized by
//! the caller holding the store behind a write lock.

use std::path::PathBuf;
use thiserror::Error;

mod bookings;
mod snapshot;
mod testimonials;

pub use bookings::*;
pub use snapshot::*;
pub use testimonials::*;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duration is unparsable (no minute count found)")]
    UnparsableDuration,

    #[error("duration of {0} minutes is out of range")]
    DurationOutOfRange(i64),

    #[error("time slot conflicts with booking {with}")]
    Conflict { with: i64 },

    #[error("no record with id {0}")]
    NotFound(i64),

    #[error("rating {0} is out of range (must be 1-5)")]
    InvalidRating(u8),

    #[error("snapshot write failed: {0}")]
    Persistence(#[from] SnapshotError),
}

/// Locations of the persisted snapshot files.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn bookings_file(&self) -> PathBuf {
        self.data_dir.join("bookings.json")
    }

    pub fn testimonials_file(&self) -> PathBuf {
        self.data_dir.join("testimonials.json")
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_paths() {
        let paths = StorePaths::new(PathBuf::from("/data"));
        assert_eq!(paths.bookings_file(), PathBuf::from("/data/bookings.json"));
        assert_eq!(
            paths.testimonials_file(),
            PathBuf::from("/data/testimonials.json")
        );
    }

    #[test]
    fn test_store_paths_default() {
        let paths = StorePaths::default();
        assert_eq!(paths.data_dir, PathBuf::from("./data"));
    }
}
