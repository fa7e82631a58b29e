//! Preference attribution: which traits correlate with high ratings.

pub mod estimator;
pub mod frequency;
pub mod pipeline;
pub mod ranker;
pub mod score_normalizer;

pub use estimator::{ConfidenceModel, TraitAttribution, TraitStat};
pub use pipeline::{calculate_preferences, PreferenceEngine};
pub use ranker::{is_informational, Diagnostic, PreferenceReport, TraitScore, INFO_SENTINEL};
pub use score_normalizer::{DegenerateDistribution, ScoreDistribution, ScoreNormalizer};

use crate::core::{Character, Score};

/// A rated (non-skipped) character resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct RatedSample<'a> {
    pub character: &'a Character,
    pub score: Score,
}
