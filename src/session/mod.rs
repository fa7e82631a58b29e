//! Rating session: the rating store plus the snapshot store it is persisted to.

pub mod persistence;
pub mod store;

pub use persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use store::RatingStore;

use crate::core::{CharacterId, Result, ResultExt, Score};

/// A rating store bound to an injected snapshot store.
///
/// Every mutation is applied in memory first and then persisted. When
/// persisting fails the error is returned, but the in-memory state keeps the
/// change.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    store: RatingStore,
    snapshots: S,
}

impl<S: SnapshotStore> Session<S> {
    /// Rehydrate from `snapshots`, starting empty if nothing was saved.
    pub fn open(snapshots: S) -> Result<Self> {
        let store = snapshots
            .load()
            .context(format!("loading session from {}", snapshots.description()))?
            .unwrap_or_default();
        log::debug!(
            "Opened session from {}: {} ratings, {} history entries",
            snapshots.description(),
            store.ratings().len(),
            store.history().len()
        );
        Ok(Self { store, snapshots })
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    pub fn rate(&mut self, character_id: CharacterId, score: Score) -> Result<()> {
        self.store.rate(character_id, score);
        self.persist()
    }

    pub fn skip(&mut self, character_id: CharacterId) -> Result<()> {
        self.store.skip(character_id);
        self.persist()
    }

    /// Undo the last action. Returns the character to present again.
    pub fn revert(&mut self) -> Result<Option<CharacterId>> {
        let reverted = self.store.revert();
        if reverted.is_some() {
            self.persist()?;
        }
        Ok(reverted)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all();
        self.snapshots
            .clear()
            .context(format!("clearing {}", self.snapshots.description()))
    }

    fn persist(&self) -> Result<()> {
        self.snapshots
            .save(&self.store)
            .context(format!("saving session to {}", self.snapshots.description()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: u8) -> Score {
        Score::new(v).unwrap()
    }

    #[test]
    fn test_open_empty_store() {
        let session = Session::open(MemorySnapshotStore::new()).unwrap();
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted_and_rehydrated() {
        let snapshots = MemorySnapshotStore::new();
        let mut session = Session::open(snapshots.clone()).unwrap();
        session.rate("a".into(), score(8)).unwrap();
        session.skip("b".into()).unwrap();

        let reopened = Session::open(snapshots).unwrap();
        assert_eq!(reopened.store(), session.store());
        assert_eq!(reopened.store().history().len(), 2);
    }

    #[test]
    fn test_revert_persists_empty_state() {
        let snapshots = MemorySnapshotStore::new();
        let mut session = Session::open(snapshots.clone()).unwrap();
        session.rate("a".into(), score(8)).unwrap();

        assert_eq!(session.revert().unwrap(), Some(CharacterId::from("a")));
        let reopened = Session::open(snapshots).unwrap();
        assert!(reopened.store().is_empty());
    }

    #[test]
    fn test_revert_without_history_returns_none() {
        let mut session = Session::open(MemorySnapshotStore::new()).unwrap();
        assert_eq!(session.revert().unwrap(), None);
    }

    #[test]
    fn test_clear_all_removes_snapshot() {
        let snapshots = MemorySnapshotStore::new();
        let mut session = Session::open(snapshots.clone()).unwrap();
        session.rate("a".into(), score(1)).unwrap();
        session.clear_all().unwrap();

        assert!(session.store().is_empty());
        assert!(snapshots.raw().is_none());
    }
}
