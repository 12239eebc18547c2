//! Persisted candidate roster.
//!
//! One JSON document holds the ordered shortlist of accepted candidates.
//! The trait keeps engine and presentation code off the concrete backing
//! store so tests can swap in an in-memory roster.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::model::SavedCandidate;
use std::path::Path;

/// Failures surfaced by roster reads and mutations. A corrupt persisted
/// document is not one of them; `load_all` absorbs it and yields an empty
/// roster.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("roster store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("roster CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Storage abstraction over the saved-candidate roster.
pub trait RosterStore: Send + Sync {
    /// Read the whole roster. Missing or unparsable documents yield an empty
    /// list.
    fn load_all(&self) -> Result<Vec<SavedCandidate>, StoreError>;

    /// Append one record (read-modify-write; duplicate ids are kept).
    fn append(&self, candidate: SavedCandidate) -> Result<(), StoreError>;

    /// Drop every record with the given id. Unknown ids leave the roster
    /// unchanged.
    fn remove_by_id(&self, id: u64) -> Result<(), StoreError>;
}

/// Write the roster to an arbitrary JSON file.
pub fn export_json(path: &Path, roster: &[SavedCandidate]) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(roster)?;
    std::fs::write(path, body)?;
    Ok(())
}

/// Write the roster to an arbitrary CSV file, one row per candidate.
pub fn export_csv(path: &Path, roster: &[SavedCandidate]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for candidate in roster {
        writer.serialize(candidate)?;
    }
    writer.flush()?;
    Ok(())
}
