use super::{RosterStore, StoreError};
use crate::model::SavedCandidate;
use std::sync::Mutex;

/// In-memory roster used by engine tests.
#[derive(Default)]
pub struct MemoryStore {
    roster: Mutex<Vec<SavedCandidate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<SavedCandidate>, StoreError> {
        Ok(self.roster.lock().expect("roster lock poisoned").clone())
    }

    fn append(&self, candidate: SavedCandidate) -> Result<(), StoreError> {
        self.roster
            .lock()
            .expect("roster lock poisoned")
            .push(candidate);
        Ok(())
    }

    fn remove_by_id(&self, id: u64) -> Result<(), StoreError> {
        self.roster
            .lock()
            .expect("roster lock poisoned")
            .retain(|c| c.id != id);
        Ok(())
    }
}
