//! The confidence update rule.

use vitae_core::config::LearningConfig;
use vitae_core::models::LearningMode;
use vitae_core::skill::{SkillConfidence, SkillValue};

/// The record to store for one dimension, and whether the skill should
/// now carry the avoid flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceUpdate {
    pub record: SkillConfidence,
    pub set_avoid: bool,
}

/// Apply `mode` to `current`.
///
/// The observation count always goes up by one. The resulting confidence
/// always lies in `[min_confidence, max_confidence]`.
pub fn compute_update(
    current: &SkillConfidence,
    mode: LearningMode,
    new_value: Option<&SkillValue>,
    config: &LearningConfig,
) -> ConfidenceUpdate {
    let observations = current.observation_count.saturating_add(1);
    let mut value = current.value.clone();
    let mut set_avoid = false;

    let raw = match mode {
        LearningMode::NoLearning => current.confidence,
        LearningMode::SoftPenalty => current.confidence * config.soft_penalty_multiplier,
        LearningMode::FullLearning => {
            let product = current.confidence * config.full_penalty_multiplier;
            set_avoid = product < config.min_confidence
                && observations > config.min_observations_for_stability;
            product
        }
        LearningMode::CorrectPrediction => current.confidence + config.correct_prediction_boost,
        LearningMode::WrongPrediction => {
            if let Some(new_value) = new_value {
                if observations >= config.min_observations_for_stability {
                    value = Some(new_value.clone());
                }
            }
            current.confidence * config.wrong_prediction_decay
        }
    };

    ConfidenceUpdate {
        record: SkillConfidence::new(
            value,
            raw.clamp(config.min_confidence, config.max_confidence),
            observations,
        ),
        set_avoid,
    }
}
