use super::{RosterStore, StoreError};
use crate::model::SavedCandidate;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

const ROSTER_FILE: &str = "saved_candidates.json";

/// Roster backed by a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the roster under an explicit directory (`--data-dir`, tests).
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(ROSTER_FILE),
        }
    }

    /// Store the roster under the platform data directory, e.g.
    /// `~/.local/share/devscout` on Linux.
    pub fn default_location() -> Result<Self, StoreError> {
        let base = dirs::data_dir().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                "no platform data directory",
            ))
        })?;
        Ok(Self {
            path: base.join("devscout").join(ROSTER_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, roster: &[SavedCandidate]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(roster)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl RosterStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<SavedCandidate>, StoreError> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&body) {
            Ok(roster) => Ok(roster),
            Err(e) => {
                // Corrupt document: recover with an empty roster instead of
                // failing every caller. The next write replaces the file.
                warn!(path = %self.path.display(), error = %e, "unparsable roster, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn append(&self, candidate: SavedCandidate) -> Result<(), StoreError> {
        let mut roster = self.load_all()?;
        roster.push(candidate);
        self.write_all(&roster)
    }

    fn remove_by_id(&self, id: u64) -> Result<(), StoreError> {
        let mut roster = self.load_all()?;
        roster.retain(|c| c.id != id);
        self.write_all(&roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(id: u64, login: &str) -> SavedCandidate {
        SavedCandidate {
            id,
            login: login.into(),
            name: None,
            avatar_url: format!("https://avatars.example/u/{id}"),
            location: None,
            email: None,
            company: None,
            bio: None,
            html_url: format!("https://github.com/{login}"),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        store.append(saved(1, "alpha")).unwrap();
        store.append(saved(2, "beta")).unwrap();

        let roster = store.load_all().unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.last().unwrap(), &saved(2, "beta"));
    }

    #[test]
    fn append_then_remove_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        store.append(saved(1, "alpha")).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![saved(1, "alpha")]);

        store.remove_by_id(1).unwrap();
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        store.append(saved(1, "alpha")).unwrap();
        store.append(saved(2, "beta")).unwrap();

        store.remove_by_id(1).unwrap();
        let once = store.load_all().unwrap();
        store.remove_by_id(1).unwrap();
        let twice = store.load_all().unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice, vec![saved(2, "beta")]);
    }

    #[test]
    fn corrupt_document_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load_all().unwrap(), Vec::new());

        // A subsequent append starts over from the empty roster.
        store.append(saved(7, "gamma")).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![saved(7, "gamma")]);
    }

    #[test]
    fn duplicate_ids_are_kept_and_removed_together() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        store.append(saved(1, "alpha")).unwrap();
        store.append(saved(1, "alpha")).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);

        store.remove_by_id(1).unwrap();
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }
}
