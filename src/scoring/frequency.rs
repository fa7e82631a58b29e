//! Minimum-support filter over the traits of rated characters.

use super::RatedSample;
use crate::core::TraitId;
use std::collections::HashMap;

/// Fewest rated characters that must carry a trait before it is scored.
pub const DEFAULT_MIN_SUPPORT: usize = 3;

/// Occurrence counts per trait, in the order traits were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitFrequency {
    counts: Vec<(TraitId, usize)>,
}

impl TraitFrequency {
    pub fn count(&self, trait_id: &TraitId) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| t == trait_id)
            .map_or(0, |(_, count)| *count)
    }

    pub fn distinct_traits(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TraitId, usize)> {
        self.counts.iter().map(|(t, c)| (t, *c))
    }

    /// Traits seen on at least `min_support` rated characters.
    pub fn frequent(&self, min_support: usize) -> Vec<TraitId> {
        self.counts
            .iter()
            .filter(|(_, count)| *count >= min_support)
            .map(|(trait_id, _)| trait_id.clone())
            .collect()
    }
}

pub fn count_trait_occurrences(samples: &[RatedSample<'_>]) -> TraitFrequency {
    let mut index: HashMap<&TraitId, usize> = HashMap::new();
    let mut counts: Vec<(TraitId, usize)> = Vec::new();

    for sample in samples {
        for trait_id in &sample.character.traits {
            match index.get(trait_id) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(trait_id, counts.len());
                    counts.push((trait_id.clone(), 1));
                }
            }
        }
    }

    TraitFrequency { counts }
}

/// Count trait occurrences and keep those meeting `min_support`.
pub fn select_frequent_traits(samples: &[RatedSample<'_>], min_support: usize) -> Vec<TraitId> {
    let frequency = count_trait_occurrences(samples);
    let selected = frequency.frequent(min_support);
    log::debug!(
        "{} of {} distinct traits reach support {}",
        selected.len(),
        frequency.distinct_traits(),
        min_support
    );
    selected
}
