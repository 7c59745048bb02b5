use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Feedback classification and confidence update tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub soft_penalty_multiplier: f64,
    pub full_penalty_multiplier: f64,
    pub correct_prediction_boost: f64,
    pub wrong_prediction_decay: f64,
    /// Confidence floor after any applied update.
    pub min_confidence: f64,
    /// Confidence ceiling after any applied update.
    pub max_confidence: f64,
    /// Observations before a stored value is authoritative.
    pub min_observations_for_stability: u64,
    /// Relevance confidence at which the user "owns" a skill.
    pub ownership_confidence_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            soft_penalty_multiplier: defaults::DEFAULT_SOFT_PENALTY_MULTIPLIER,
            full_penalty_multiplier: defaults::DEFAULT_FULL_PENALTY_MULTIPLIER,
            correct_prediction_boost: defaults::DEFAULT_CORRECT_PREDICTION_BOOST,
            wrong_prediction_decay: defaults::DEFAULT_WRONG_PREDICTION_DECAY,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            max_confidence: defaults::DEFAULT_MAX_CONFIDENCE,
            min_observations_for_stability: defaults::DEFAULT_MIN_OBSERVATIONS_FOR_STABILITY,
            ownership_confidence_threshold: defaults::DEFAULT_OWNERSHIP_CONFIDENCE_THRESHOLD,
        }
    }
}

impl LearningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("learning.soft_penalty_multiplier", self.soft_penalty_multiplier),
            ("learning.full_penalty_multiplier", self.full_penalty_multiplier),
            ("learning.wrong_prediction_decay", self.wrong_prediction_decay),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(super::out_of_range(field, value, "must be within (0, 1]"));
            }
        }
        for (field, value) in [
            ("learning.correct_prediction_boost", self.correct_prediction_boost),
            ("learning.min_confidence", self.min_confidence),
            ("learning.max_confidence", self.max_confidence),
            (
                "learning.ownership_confidence_threshold",
                self.ownership_confidence_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(super::out_of_range(field, value, "must be within [0, 1]"));
            }
        }
        if self.min_confidence >= self.max_confidence {
            return Err(super::out_of_range(
                "learning.min_confidence",
                self.min_confidence,
                "must be below learning.max_confidence",
            ));
        }
        if self.min_observations_for_stability == 0 {
            return Err(super::out_of_range(
                "learning.min_observations_for_stability",
                self.min_observations_for_stability,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
