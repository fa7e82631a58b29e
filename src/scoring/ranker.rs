//! Final ordering of trait scores and the informational results returned when
//! the input cannot support a ranking.
//!
//! Consumers receive a flat list of `{trait, score}` entries either way. An
//! informational list is recognised by its first label being
//! [`INFO_SENTINEL`] with every score exactly zero; see [`is_informational`].

use super::estimator::TraitAttribution;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scores with a smaller magnitude are treated as noise.
pub const DEFAULT_NOISE_FLOOR: f64 = 0.01;

/// First label of every informational result list.
pub const INFO_SENTINEL: &str = "Rating result";

/// One row of the external result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    #[serde(rename = "trait")]
    pub label: String,
    pub score: f64,
}

impl TraitScore {
    fn info(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            score: 0.0,
        }
    }
}

/// Statistically degenerate inputs, reported instead of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No trait reached the minimum support.
    InsufficientTraitFrequency,
    /// Every rated character got the same score.
    IdenticalRatings { average: f64 },
    /// Traits were scored but none cleared the noise floor.
    ScoresTooClose,
}

impl Diagnostic {
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![INFO_SENTINEL.to_string()];
        match self {
            Diagnostic::InsufficientTraitFrequency => {
                messages.push("No trait appears often enough among rated characters".into());
                messages.push("Rate more characters".into());
            }
            Diagnostic::IdenticalRatings { average } => {
                messages.push("All characters received the same rating".into());
                messages.push(format!("Average score: {average:.1}"));
            }
            Diagnostic::ScoresTooClose => {
                messages.push("All trait scores are close to zero".into());
                messages.push("Ratings may be too few or too uniform".into());
                messages
                    .push("Try rating more characters or using a wider range of scores".into());
            }
        }
        messages
    }
}

/// Outcome of one preference calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreferenceReport {
    /// Nothing has been rated yet.
    NoRatings,
    Diagnostic { diagnostic: Diagnostic },
    /// Significant traits in display order, with the breakdown of every
    /// trait that was scored (including those under the noise floor).
    Ranked {
        scores: Vec<TraitScore>,
        attributions: Vec<TraitAttribution>,
    },
}

impl PreferenceReport {
    pub fn diagnostic(diagnostic: Diagnostic) -> Self {
        PreferenceReport::Diagnostic { diagnostic }
    }

    /// Flatten into the `{trait, score}` list handed to displays.
    pub fn entries(&self) -> Vec<TraitScore> {
        match self {
            PreferenceReport::NoRatings => Vec::new(),
            PreferenceReport::Diagnostic { diagnostic } => diagnostic
                .messages()
                .into_iter()
                .map(TraitScore::info)
                .collect(),
            PreferenceReport::Ranked { scores, .. } => scores.clone(),
        }
    }

    pub fn is_informational(&self) -> bool {
        matches!(self, PreferenceReport::Diagnostic { .. })
    }
}

/// Detection rule for informational result lists.
pub fn is_informational(entries: &[TraitScore]) -> bool {
    entries
        .first()
        .is_some_and(|first| first.label == INFO_SENTINEL)
        && entries.iter().all(|entry| entry.score == 0.0)
}

fn by_score_descending(a: &TraitScore, b: &TraitScore) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Drop scores under `noise_floor` and sort the rest by signed score,
/// highest first. The sort is stable: ties keep their input order.
pub fn rank(attributions: Vec<TraitAttribution>, noise_floor: f64) -> PreferenceReport {
    let mut scores: Vec<TraitScore> = attributions
        .iter()
        .filter(|a| a.score.abs() >= noise_floor)
        .map(|a| TraitScore {
            label: a.trait_id.to_string(),
            score: a.score,
        })
        .collect();
    scores.sort_by(by_score_descending);

    log::debug!(
        "{} traits scored, {} above noise floor {}",
        attributions.len(),
        scores.len(),
        noise_floor
    );

    if scores.is_empty() && !attributions.is_empty() {
        return PreferenceReport::diagnostic(Diagnostic::ScoresTooClose);
    }

    PreferenceReport::Ranked {
        scores,
        attributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attribution(name: &str, score: f64) -> TraitAttribution {
        TraitAttribution {
            trait_id: name.into(),
            score,
            test_avg: 0.0,
            test_count: 3,
            control_avg: 0.0,
            control_count: 3,
            delta: 0.0,
            count_factor: 0.0,
        }
    }

    fn labels(report: &PreferenceReport) -> Vec<String> {
        report.entries().into_iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_rank_sorts_by_signed_score() {
        let report = rank(
            vec![
                attribution("a", -5.0),
                attribution("b", 2.0),
                attribution("c", 7.5),
            ],
            DEFAULT_NOISE_FLOOR,
        );
        assert_eq!(labels(&report), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let report = rank(
            vec![
                attribution("first", 1.0),
                attribution("second", 1.0),
                attribution("top", 3.0),
            ],
            DEFAULT_NOISE_FLOOR,
        );
        assert_eq!(labels(&report), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_rank_drops_noise() {
        let report = rank(
            vec![
                attribution("tiny", 0.009),
                attribution("negative_tiny", -0.005),
                attribution("edge", -0.01),
                attribution("real", 0.5),
            ],
            DEFAULT_NOISE_FLOOR,
        );
        assert_eq!(labels(&report), vec!["real", "edge"]);
        if let PreferenceReport::Ranked { attributions, .. } = &report {
            assert_eq!(attributions.len(), 4);
        } else {
            panic!("expected ranked report");
        }
    }

    #[test]
    fn test_rank_all_noise_reports_too_close() {
        let report = rank(vec![attribution("tiny", 0.0)], DEFAULT_NOISE_FLOOR);
        assert_eq!(
            report,
            PreferenceReport::diagnostic(Diagnostic::ScoresTooClose)
        );
        assert_eq!(report.entries().len(), 4);
        assert!(is_informational(&report.entries()));
    }

    #[test]
    fn test_rank_nothing_scored_is_empty_ranking() {
        let report = rank(Vec::new(), DEFAULT_NOISE_FLOOR);
        assert!(report.entries().is_empty());
        assert!(!report.is_informational());
    }

    #[test]
    fn test_identical_ratings_message_includes_average() {
        let entries =
            PreferenceReport::diagnostic(Diagnostic::IdenticalRatings { average: 7.0 }).entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, INFO_SENTINEL);
        assert_eq!(entries[2].label, "Average score: 7.0");
    }

    #[test]
    fn test_detection_rule() {
        let info = PreferenceReport::diagnostic(Diagnostic::InsufficientTraitFrequency).entries();
        assert!(is_informational(&info));

        let mut real = info.clone();
        real[1].score = 0.5;
        assert!(!is_informational(&real));

        let ranked = vec![TraitScore {
            label: "maid".into(),
            score: 0.0,
        }];
        assert!(!is_informational(&ranked));
        assert!(!is_informational(&[]));
    }

    #[test]
    fn test_entries_serialize_with_trait_key() {
        let json = serde_json::to_value(TraitScore {
            label: "maid".into(),
            score: 1.5,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"trait": "maid", "score": 1.5}));
    }
}
