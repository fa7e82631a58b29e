//! Per-trait attribution: a mean-difference test between characters that
//! carry a trait and those that do not, dampened by sample size.
//!
//! For a trait with `n` rated characters in the test group and `m` in the
//! control group:
//!
//! ```text
//! delta        = mean(z | has trait) - mean(z | lacks trait)
//! count_factor = clamp(ln(n*m / (n+m) / 2 + 1) - offset, 0, cap)
//! score        = delta * count_factor * scale
//! ```

use super::score_normalizer::ScoreNormalizer;
use super::RatedSample;
use crate::core::TraitId;
use serde::Serialize;

pub const DEFAULT_CONFIDENCE_OFFSET: f64 = 0.7;
pub const DEFAULT_CONFIDENCE_CAP: f64 = 1.8;
pub const DEFAULT_SCORE_SCALE: f64 = 10.0;

/// Accumulators over normalized scores for one trait.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraitStat {
    pub test_count: usize,
    pub control_count: usize,
    pub test_sum: f64,
    pub control_sum: f64,
}

impl TraitStat {
    pub fn record(&mut self, has_trait: bool, normalized: f64) {
        if has_trait {
            self.test_count += 1;
            self.test_sum += normalized;
        } else {
            self.control_count += 1;
            self.control_sum += normalized;
        }
    }

    /// Both groups must be non-empty for the comparison to mean anything.
    pub fn is_comparable(&self) -> bool {
        self.test_count > 0 && self.control_count > 0
    }
}

/// Sample-size dampener parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceModel {
    pub offset: f64,
    pub cap: f64,
    pub scale: f64,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            offset: DEFAULT_CONFIDENCE_OFFSET,
            cap: DEFAULT_CONFIDENCE_CAP,
            scale: DEFAULT_SCORE_SCALE,
        }
    }
}

impl ConfidenceModel {
    /// Saturating confidence for group sizes `n` and `m`.
    pub fn count_factor(&self, n: usize, m: usize) -> f64 {
        let (n, m) = (n as f64, m as f64);
        let raw = ((n * m) / (n + m) / 2.0 + 1.0).ln() - self.offset;
        raw.max(0.0).min(self.cap)
    }
}

/// Full breakdown of one trait's score, kept for explanation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitAttribution {
    #[serde(rename = "trait")]
    pub trait_id: TraitId,
    pub score: f64,
    pub test_avg: f64,
    pub test_count: usize,
    pub control_avg: f64,
    pub control_count: usize,
    pub delta: f64,
    pub count_factor: f64,
}

/// Split every sample into test/control groups for each trait.
pub fn accumulate_trait_stats(
    traits: &[TraitId],
    samples: &[RatedSample<'_>],
    normalizer: &ScoreNormalizer,
) -> Vec<(TraitId, TraitStat)> {
    let mut stats: Vec<(TraitId, TraitStat)> = traits
        .iter()
        .map(|t| (t.clone(), TraitStat::default()))
        .collect();

    for sample in samples {
        let normalized = normalizer.normalize(sample.score);
        for (trait_id, stat) in stats.iter_mut() {
            stat.record(sample.character.has_trait(trait_id), normalized);
        }
    }

    stats
}

/// Score one trait, or `None` when one of its groups is empty.
pub fn estimate(
    trait_id: &TraitId,
    stat: &TraitStat,
    model: &ConfidenceModel,
) -> Option<TraitAttribution> {
    if !stat.is_comparable() {
        log::debug!(
            "Trait \"{}\" skipped: test_count={}, control_count={}",
            trait_id,
            stat.test_count,
            stat.control_count
        );
        return None;
    }

    let test_avg = stat.test_sum / stat.test_count as f64;
    let control_avg = stat.control_sum / stat.control_count as f64;
    let delta = test_avg - control_avg;
    let count_factor = model.count_factor(stat.test_count, stat.control_count);
    let score = delta * count_factor * model.scale;

    log::debug!(
        "Trait \"{}\": test_count={}, control_count={}, test_avg={:.2}, control_avg={:.2}, \
         delta={:.2}, count_factor={:.2}, score={:.2}",
        trait_id,
        stat.test_count,
        stat.control_count,
        test_avg,
        control_avg,
        delta,
        count_factor,
        score
    );

    Some(TraitAttribution {
        trait_id: trait_id.clone(),
        score,
        test_avg,
        test_count: stat.test_count,
        control_avg,
        control_count: stat.control_count,
        delta,
        count_factor,
    })
}

/// Attribute every trait in `traits`, preserving their order.
pub fn attribute_traits(
    traits: &[TraitId],
    samples: &[RatedSample<'_>],
    normalizer: &ScoreNormalizer,
    model: &ConfidenceModel,
) -> Vec<TraitAttribution> {
    accumulate_trait_stats(traits, samples, normalizer)
        .iter()
        .filter_map(|(trait_id, stat)| estimate(trait_id, stat, model))
        .collect()
}
