//! JSON array snapshot files.
//!
//! The snapshot is the source of truth across restarts. Writes replace
//! the whole file; reads load the whole array. A missing or corrupt file
//! degrades to an empty collection with a warning, never a startup
//! failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from snapshot IO.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a snapshot, treating a missing or unreadable file as empty.
pub fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        debug!("No snapshot at {:?}, starting empty", path);
        return Vec::new();
    }
    match read_array(path) {
        Ok(items) => items,
        Err(e) => {
            warn!("Snapshot {:?} unreadable ({}), starting empty", path, e);
            Vec::new()
        }
    }
}

/// Read the full JSON array at `path`.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SnapshotError> {
    let file = File::open(path)?;
    let items = serde_json::from_reader(BufReader::new(file))?;
    Ok(items)
}

/// Rewrite the snapshot at `path` with the full collection.
pub fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, items)?;
    // Flush before returning so a failed write surfaces here, not in a
    // silent drop; the rollback paths rely on this error.
    writer.flush()?;
    debug!("Wrote {} records to {:?}", items.len(), path);
    Ok(())
}
