//! Snapshot storage for rating sessions.
//!
//! A [`SnapshotStore`] is injected into a [`Session`](super::Session) so that
//! the store handle belongs to whoever owns the session instead of living in
//! process-wide state.
//!
//! # Example
//!
//! ```rust
//! use moerank::session::{MemorySnapshotStore, RatingStore, SnapshotStore};
//!
//! let snapshots = MemorySnapshotStore::new();
//! snapshots.save(&RatingStore::new()).unwrap();
//! assert!(snapshots.load().unwrap().is_some());
//! ```

use super::store::RatingStore;
use crate::core::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Key-value style storage for a serialized [`RatingStore`].
pub trait SnapshotStore {
    /// Load the last saved snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<RatingStore>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &RatingStore) -> Result<()>;

    /// Remove the stored snapshot entirely.
    fn clear(&self) -> Result<()>;

    /// Get a description of the store for log and error messages.
    fn description(&self) -> String;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<RatingStore>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io_at(&self.path, e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| Error::parse(&self.path, e.to_string()))
    }

    fn save(&self, snapshot: &RatingStore) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json).map_err(|e| Error::io_at(&self.path, e))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_at(&self.path, e)),
        }
    }

    fn description(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-memory snapshot store for testing.
///
/// Clones share one buffer, so a test can keep a handle and inspect what the
/// session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    buffer: Arc<RwLock<Option<String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON of the last saved snapshot.
    pub fn raw(&self) -> Option<String> {
        self.buffer.read().ok().and_then(|guard| guard.clone())
    }

    fn poisoned() -> Error {
        Error::Persistence("snapshot buffer lock poisoned".into())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<RatingStore>> {
        let guard = self.buffer.read().map_err(|_| Self::poisoned())?;
        guard
            .as_deref()
            .map(serde_json::from_str::<RatingStore>)
            .transpose()
            .map_err(Error::from)
    }

    fn save(&self, snapshot: &RatingStore) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.buffer.write().map_err(|_| Self::poisoned())? = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.buffer.write().map_err(|_| Self::poisoned())? = None;
        Ok(())
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}
