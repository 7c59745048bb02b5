//! Feedback classifier.

use vitae_core::config::LearningConfig;
use vitae_core::models::{FeedbackAction, FeedbackEvent, LearningMode};
use vitae_core::skill::SkillPriors;

/// Classify one piece of feedback against the skill's current priors.
///
/// Deletions split three ways: outside a skill or requirement list the
/// skill is only contextually wrong (`NoLearning`); a skill the user owns
/// was mis-surfaced (`SoftPenalty`); anything else is a gap (`FullLearning`).
pub fn classify(event: &FeedbackEvent, priors: &SkillPriors, config: &LearningConfig) -> LearningMode {
    match event.action {
        FeedbackAction::Accept => LearningMode::CorrectPrediction,
        FeedbackAction::Edit { .. } => LearningMode::WrongPrediction,
        FeedbackAction::Delete if !event.section.is_skill_section() => LearningMode::NoLearning,
        FeedbackAction::Delete if owns(priors, config) => LearningMode::SoftPenalty,
        FeedbackAction::Delete => LearningMode::FullLearning,
    }
}

/// Ownership is judged on relevance evidence only.
fn owns(priors: &SkillPriors, config: &LearningConfig) -> bool {
    priors.relevance.is_observed()
        && priors.relevance.confidence >= config.ownership_confidence_threshold
}
