//! Attribution pipeline configuration
//!
//! The defaults are the calibrated constants of the preference model; a
//! `[attribution]` table in `.moerank.toml` may override any of them.

use crate::scoring::estimator::{
    ConfidenceModel, DEFAULT_CONFIDENCE_CAP, DEFAULT_CONFIDENCE_OFFSET, DEFAULT_SCORE_SCALE,
};
use crate::scoring::frequency::DEFAULT_MIN_SUPPORT;
use crate::scoring::ranker::DEFAULT_NOISE_FLOOR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Minimum number of rated characters carrying a trait
    #[serde(default = "default_min_support")]
    pub min_support: usize,

    /// Scores with a smaller magnitude are dropped from the ranking
    #[serde(default = "default_noise_floor")]
    pub noise_floor: f64,

    /// Subtracted from the log sample-size term before clamping
    #[serde(default = "default_confidence_offset")]
    pub confidence_offset: f64,

    /// Upper bound of the count factor
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,

    /// Multiplier applied to the dampened z-score delta
    #[serde(default = "default_score_scale")]
    pub score_scale: f64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            noise_floor: default_noise_floor(),
            confidence_offset: default_confidence_offset(),
            confidence_cap: default_confidence_cap(),
            score_scale: default_score_scale(),
        }
    }
}

impl AttributionConfig {
    // Pure function: Validate a single non-negative finite value
    fn validate_non_negative(value: f64, name: &str) -> Result<(), String> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(format!("{name} must be a finite, non-negative number"))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_support == 0 {
            return Err("min_support must be at least 1".to_string());
        }
        Self::validate_non_negative(self.noise_floor, "noise_floor")?;
        Self::validate_non_negative(self.confidence_offset, "confidence_offset")?;
        Self::validate_non_negative(self.confidence_cap, "confidence_cap")?;
        if self.confidence_cap == 0.0 {
            return Err("confidence_cap must be greater than 0".to_string());
        }
        if !self.score_scale.is_finite() || self.score_scale <= 0.0 {
            return Err("score_scale must be a finite, positive number".to_string());
        }
        Ok(())
    }

    pub fn confidence_model(&self) -> ConfidenceModel {
        ConfidenceModel {
            offset: self.confidence_offset,
            cap: self.confidence_cap,
            scale: self.score_scale,
        }
    }
}

pub fn default_min_support() -> usize {
    DEFAULT_MIN_SUPPORT
}

pub fn default_noise_floor() -> f64 {
    DEFAULT_NOISE_FLOOR
}

pub fn default_confidence_offset() -> f64 {
    DEFAULT_CONFIDENCE_OFFSET
}

pub fn default_confidence_cap() -> f64 {
    DEFAULT_CONFIDENCE_CAP
}

pub fn default_score_scale() -> f64 {
    DEFAULT_SCORE_SCALE
}
