use crate::core::Score;
use std::collections::BTreeMap;
use thiserror::Error;

/// Rated scores aggregated by raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreDistribution {
    weights: BTreeMap<Score, usize>, // Raw score -> number of ratings
}

impl ScoreDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores<I: IntoIterator<Item = Score>>(scores: I) -> Self {
        let mut distribution = Self::new();
        for score in scores {
            distribution.add(score);
        }
        distribution
    }

    pub fn add(&mut self, score: Score) {
        *self.weights.entry(score).or_insert(0) += 1;
    }

    pub fn total_weight(&self) -> usize {
        self.weights.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weighted mean, `None` for an empty distribution.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let sum: f64 = self
            .weights
            .iter()
            .map(|(score, &weight)| score.as_f64() * weight as f64)
            .sum();
        Some(sum / total as f64)
    }

    /// Population standard deviation (divisor is the total weight).
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let total = self.total_weight() as f64;
        let variance: f64 = self
            .weights
            .iter()
            .map(|(score, &weight)| {
                let diff = score.as_f64() - mean;
                diff * diff * weight as f64
            })
            .sum();
        Some((variance / total).sqrt())
    }
}

/// Why a distribution cannot be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateDistribution {
    #[error("no rated scores to normalize")]
    Empty,
    #[error("all rated scores equal {mean:.1}; standard deviation is zero")]
    ZeroVariance { mean: f64 },
}

/// Maps raw scores to z-scores of the rated population.
///
/// Construction fails for degenerate inputs, so a normalizer that exists
/// always has a non-zero standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreNormalizer {
    mean: f64,
    std_dev: f64,
}

impl ScoreNormalizer {
    pub fn from_distribution(
        distribution: &ScoreDistribution,
    ) -> Result<Self, DegenerateDistribution> {
        let (mean, std_dev) = distribution
            .mean()
            .zip(distribution.std_dev())
            .ok_or(DegenerateDistribution::Empty)?;

        if std_dev == 0.0 {
            return Err(DegenerateDistribution::ZeroVariance { mean });
        }

        Ok(Self { mean, std_dev })
    }

    pub fn from_scores(scores: &[Score]) -> Result<Self, DegenerateDistribution> {
        Self::from_distribution(&ScoreDistribution::from_scores(scores.iter().copied()))
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn normalize(&self, score: Score) -> f64 {
        (score.as_f64() - self.mean) / self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[u8]) -> Vec<Score> {
        values.iter().map(|&v| Score::new(v).unwrap()).collect()
    }

    #[test]
    fn test_distribution_aggregates_by_value() {
        let distribution = ScoreDistribution::from_scores(scores(&[3, 3, 7]));
        assert_eq!(distribution.total_weight(), 3);
        assert!((distribution.mean().unwrap() - 13.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_std_dev() {
        // mean 5, squared deviations 9 + 1 + 1 + 9 = 20, population variance 5
        let distribution = ScoreDistribution::from_scores(scores(&[2, 4, 6, 8]));
        assert_eq!(distribution.mean(), Some(5.0));
        assert!((distribution.std_dev().unwrap() - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_rejected() {
        let result = ScoreNormalizer::from_scores(&scores(&[5, 5, 5, 5, 5]));
        assert_eq!(result, Err(DegenerateDistribution::ZeroVariance { mean: 5.0 }));
    }

    #[test]
    fn test_single_rating_is_zero_variance() {
        let result = ScoreNormalizer::from_scores(&scores(&[9]));
        assert!(matches!(
            result,
            Err(DegenerateDistribution::ZeroVariance { .. })
        ));
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(
            ScoreNormalizer::from_scores(&[]),
            Err(DegenerateDistribution::Empty)
        );
    }

    #[test]
    fn test_normalized_scores_have_zero_mean_unit_variance() {
        let raw = scores(&[0, 1, 4, 6, 9, 10, 10]);
        let normalizer = ScoreNormalizer::from_scores(&raw).unwrap();
        let z: Vec<f64> = raw.iter().map(|&s| normalizer.normalize(s)).collect();

        let n = z.len() as f64;
        let mean = z.iter().sum::<f64>() / n;
        let variance = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 1e-9);
        assert!((variance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_is_monotonic() {
        let normalizer = ScoreNormalizer::from_scores(&scores(&[1, 5, 9])).unwrap();
        for v in 1..=10 {
            let lower = normalizer.normalize(Score::new(v - 1).unwrap());
            let upper = normalizer.normalize(Score::new(v).unwrap());
            assert!(upper > lower, "normalized scores should be monotonic");
        }
    }
}
