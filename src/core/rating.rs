//! Rating values and the undo log entries recorded for each user action.
//!
//! A skipped character is an explicit [`RatingValue::Skipped`] variant. The
//! legacy `-1` sentinel only exists in the serialized form so that stored
//! sessions stay readable; scoring code never sees it.

use super::{CharacterId, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated rating on the 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(10);

    pub fn new(value: u8) -> Result<Self> {
        if value <= Self::MAX.0 {
            Ok(Score(value))
        } else {
            Err(Error::Validation(format!(
                "score {value} is out of range 0..={}",
                Self::MAX.0
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for Score {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Current state of a character in the rating map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RatingValue {
    Rated(Score),
    Skipped,
}

impl RatingValue {
    const SKIPPED_SENTINEL: i64 = -1;

    pub fn score(self) -> Option<Score> {
        match self {
            RatingValue::Rated(score) => Some(score),
            RatingValue::Skipped => None,
        }
    }

    pub fn is_skipped(self) -> bool {
        matches!(self, RatingValue::Skipped)
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value == Self::SKIPPED_SENTINEL {
            return Ok(RatingValue::Skipped);
        }
        u8::try_from(value)
            .map_err(|_| Error::Validation(format!("rating value {value} is out of range")))
            .and_then(Score::new)
            .map(RatingValue::Rated)
    }
}

impl From<RatingValue> for i64 {
    fn from(value: RatingValue) -> Self {
        match value {
            RatingValue::Rated(score) => i64::from(score.value()),
            RatingValue::Skipped => RatingValue::SKIPPED_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub score: RatingValue,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// One user action, in append order. `score == None` records a skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryItem {
    pub character_id: CharacterId,
    pub score: Option<Score>,
    pub timestamp: i64,
}

impl RatingHistoryItem {
    pub fn is_skip(&self) -> bool {
        self.score.is_none()
    }
}

/// Coarse sentiment bucket shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingLevel {
    Dislike,
    Neutral,
    Like,
}

impl RatingLevel {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            8..=10 => RatingLevel::Like,
            3..=7 => RatingLevel::Neutral,
            _ => RatingLevel::Dislike,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingLevel::Dislike => "dislike",
            RatingLevel::Neutral => "neutral",
            RatingLevel::Like => "like",
        }
    }
}
