//! LearningEngine: classify a feedback event, then apply it.

use std::sync::Arc;

use vitae_core::config::LearningConfig;
use vitae_core::errors::VitaeResult;
use vitae_core::models::{FeedbackEvent, LearningMode};
use vitae_core::skill::{normalize_skill, Dimension, SkillConfidence};
use vitae_observability::feedback_span;
use vitae_observability::tracing_setup::events;
use vitae_priors::PriorsStore;

use crate::classifier::classify;
use crate::updater::ConfidenceUpdater;

/// What recording one feedback event did.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackResult {
    pub skill: String,
    pub dimension: Dimension,
    pub mode: LearningMode,
    /// The dimension record as stored after the update.
    pub record: SkillConfidence,
    pub avoid_set: bool,
}

pub struct LearningEngine {
    priors: Arc<PriorsStore>,
    updater: ConfidenceUpdater,
}

impl LearningEngine {
    pub fn new(priors: Arc<PriorsStore>, config: LearningConfig) -> Self {
        Self {
            updater: ConfidenceUpdater::new(Arc::clone(&priors), config),
            priors,
        }
    }

    pub fn config(&self) -> &LearningConfig {
        self.updater.config()
    }

    /// Preview the mode `event` would get, from one read. Nothing is written.
    pub fn classify(&self, event: &FeedbackEvent) -> VitaeResult<LearningMode> {
        let priors = self.priors.try_get(&event.skill)?;
        Ok(classify(event, &priors, self.config()))
    }

    /// Classify `event` and apply the resulting update under the skill's
    /// lock. Errors mean the confidence record was not stored, except for a
    /// failed avoid-flag write (see [`ConfidenceUpdater::apply_feedback`]).
    pub fn record_feedback(&self, event: &FeedbackEvent) -> VitaeResult<FeedbackResult> {
        let skill = normalize_skill(&event.skill);
        let span = feedback_span!(skill, event.dimension);
        let _entered = span.enter();

        let applied = self.updater.apply_feedback(event)?;
        events::feedback_classified(&skill, event.dimension.as_str(), applied.mode.as_str());

        Ok(FeedbackResult {
            skill,
            dimension: event.dimension,
            mode: applied.mode,
            record: applied.record,
            avoid_set: applied.avoid_set,
        })
    }
}
