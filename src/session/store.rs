//! In-memory rating state: the current rating per character plus the
//! append-only action log used for undo.

use crate::core::{CharacterId, Rating, RatingHistoryItem, RatingValue, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current ratings and the chronological action history of one session.
///
/// Every operation is infallible. Persistence is handled by
/// [`Session`](super::Session), which wraps a store together with a
/// [`SnapshotStore`](super::SnapshotStore).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStore {
    #[serde(default)]
    ratings: BTreeMap<CharacterId, Rating>,
    #[serde(default)]
    history: Vec<RatingHistoryItem>,
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate(&mut self, character_id: CharacterId, score: Score) {
        self.rate_at(character_id, score, now_millis());
    }

    /// Record a rating with an explicit timestamp in epoch milliseconds.
    pub fn rate_at(&mut self, character_id: CharacterId, score: Score, timestamp: i64) {
        self.ratings.insert(
            character_id.clone(),
            Rating {
                score: RatingValue::Rated(score),
                timestamp,
            },
        );
        self.history.push(RatingHistoryItem {
            character_id,
            score: Some(score),
            timestamp,
        });
    }

    pub fn skip(&mut self, character_id: CharacterId) {
        self.skip_at(character_id, now_millis());
    }

    pub fn skip_at(&mut self, character_id: CharacterId, timestamp: i64) {
        self.ratings.insert(
            character_id.clone(),
            Rating {
                score: RatingValue::Skipped,
                timestamp,
            },
        );
        self.history.push(RatingHistoryItem {
            character_id,
            score: None,
            timestamp,
        });
    }

    /// Undo the most recent action and return the character it touched.
    ///
    /// Undoing a rating removes the character's entry outright, even when an
    /// older action for the same character is still in the history. Undoing
    /// a skip leaves the skipped entry in place.
    pub fn revert(&mut self) -> Option<CharacterId> {
        let last = self.history.pop()?;
        if last.score.is_some() {
            self.ratings.remove(&last.character_id);
        }
        Some(last.character_id)
    }

    pub fn clear_all(&mut self) {
        self.ratings.clear();
        self.history.clear();
    }

    pub fn get(&self, character_id: &str) -> Option<&Rating> {
        self.ratings.get(character_id)
    }

    pub fn ratings(&self) -> &BTreeMap<CharacterId, Rating> {
        &self.ratings
    }

    pub fn history(&self) -> &[RatingHistoryItem] {
        &self.history
    }

    /// Characters with a real score, in id order. Skips are excluded.
    pub fn rated(&self) -> impl Iterator<Item = (&CharacterId, Score)> {
        self.ratings
            .iter()
            .filter_map(|(id, rating)| rating.score.score().map(|score| (id, score)))
    }

    pub fn rated_count(&self) -> usize {
        self.rated().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.ratings
            .values()
            .filter(|rating| rating.score.is_skipped())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty() && self.history.is_empty()
    }
}
