//! One synchronous pass from rating state to a preference report.
//!
//! Stages, in order:
//! 1. resolve rated (non-skipped) characters against the catalog
//! 2. keep traits with enough support
//! 3. normalize scores against the rated population
//! 4. attribute each trait
//! 5. rank, or report why no ranking is possible
//!
//! The pass reads a snapshot and has no side effects, so running it twice on
//! unchanged input yields the same report.

use super::estimator::attribute_traits;
use super::frequency::select_frequent_traits;
use super::ranker::{rank, Diagnostic, PreferenceReport};
use super::score_normalizer::{DegenerateDistribution, ScoreDistribution, ScoreNormalizer};
use super::RatedSample;
use crate::config::AttributionConfig;
use crate::core::Catalog;
use crate::session::RatingStore;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PreferenceEngine {
    config: AttributionConfig,
}

impl PreferenceEngine {
    pub fn new(config: AttributionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    pub fn calculate(&self, store: &RatingStore, catalog: &Catalog) -> PreferenceReport {
        let rated_count = store.rated_count();
        log::info!("Calculating preferences over {rated_count} rated characters");
        if rated_count == 0 {
            return PreferenceReport::NoRatings;
        }

        let start = Instant::now();
        let samples = resolve_samples(store, catalog);

        let traits = select_frequent_traits(&samples, self.config.min_support);
        if traits.is_empty() {
            log::info!("No trait reaches support {}", self.config.min_support);
            return PreferenceReport::diagnostic(Diagnostic::InsufficientTraitFrequency);
        }

        let distribution = ScoreDistribution::from_scores(samples.iter().map(|s| s.score));
        let normalizer = match ScoreNormalizer::from_distribution(&distribution) {
            Ok(normalizer) => normalizer,
            Err(DegenerateDistribution::ZeroVariance { mean }) => {
                log::info!("Standard deviation is zero; every rating equals {mean:.2}");
                return PreferenceReport::diagnostic(Diagnostic::IdenticalRatings {
                    average: mean,
                });
            }
            // traits were found, so at least one sample exists
            Err(DegenerateDistribution::Empty) => {
                return PreferenceReport::diagnostic(Diagnostic::InsufficientTraitFrequency);
            }
        };
        log::debug!(
            "Score mean {:.2}, standard deviation {:.2}",
            normalizer.mean(),
            normalizer.std_dev()
        );

        let attributions = attribute_traits(
            &traits,
            &samples,
            &normalizer,
            &self.config.confidence_model(),
        );
        let report = rank(attributions, self.config.noise_floor);

        log::info!(
            "Preference calculation finished with {} entries in {:?}",
            report.entries().len(),
            start.elapsed()
        );
        report
    }
}

/// Rated characters paired with their records. Ratings for ids missing from
/// the catalog are left out.
fn resolve_samples<'a>(store: &RatingStore, catalog: &'a Catalog) -> Vec<RatedSample<'a>> {
    store
        .rated()
        .filter_map(|(id, score)| match catalog.get(id.as_str()) {
            Some(character) => Some(RatedSample { character, score }),
            None => {
                log::warn!("Rated character '{id}' is not in the catalog; ignoring it");
                None
            }
        })
        .collect()
}

/// Run the pipeline with the default configuration.
pub fn calculate_preferences(store: &RatingStore, catalog: &Catalog) -> PreferenceReport {
    PreferenceEngine::default().calculate(store, catalog)
}
