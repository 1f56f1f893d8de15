//! Local snapshot storage backends.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use cerfa_core::models::FormSnapshot;
use cerfa_core::session::{SessionError, SnapshotStore};

/// One JSON file holding the latest snapshot. Missing file means an empty
/// slot; a corrupt file is reported, not silently discarded.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<FormSnapshot>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };
        let snapshot =
            serde_json::from_str(&raw).map_err(|e| SessionError::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &FormSnapshot) -> Result<(), SessionError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| SessionError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

/// In-memory slot, for tests and for running without any persistence.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<FormSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<FormSnapshot>, SessionError> {
        match self.slot.lock() {
            Ok(slot) => Ok(slot.clone()),
            Err(_) => Err(SessionError::Storage("snapshot slot poisoned".to_string())),
        }
    }

    fn save(&self, snapshot: &FormSnapshot) -> Result<(), SessionError> {
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = Some(snapshot.clone());
                Ok(())
            }
            Err(_) => Err(SessionError::Storage("snapshot slot poisoned".to_string())),
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = None;
                Ok(())
            }
            Err(_) => Err(SessionError::Storage("snapshot slot poisoned".to_string())),
        }
    }
}
