use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LearningMode;

/// What an effectiveness record is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum EffectivenessSubject {
    Skill(String),
    Annotation(String),
}

/// A downstream outcome for a scored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Edited,
    /// Deleted without a gap signal (no learning or soft penalty).
    SoftDeleted,
    /// Deleted as a genuine gap (full learning).
    HardDeleted,
    Interview,
    Offer,
}

impl Outcome {
    /// Outcome for a feedback action once its learning mode is known.
    pub fn from_learning_mode(mode: LearningMode) -> Self {
        match mode {
            LearningMode::CorrectPrediction => Self::Accepted,
            LearningMode::WrongPrediction => Self::Edited,
            LearningMode::NoLearning | LearningMode::SoftPenalty => Self::SoftDeleted,
            LearningMode::FullLearning => Self::HardDeleted,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Interview | Self::Offer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Edited => "edited",
            Self::SoftDeleted => "soft_deleted",
            Self::HardDeleted => "hard_deleted",
            Self::Interview => "interview",
            Self::Offer => "offer",
        }
    }
}

/// Append-only log entry linking a skill or annotation to an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessRecord {
    pub id: String,
    pub subject: EffectivenessSubject,
    pub outcome: Outcome,
    /// Active annotations per candidate in the selection that produced the item.
    #[serde(default)]
    pub annotation_density: Option<f64>,
    #[serde(default)]
    pub learning_mode: Option<LearningMode>,
    pub recorded_at: DateTime<Utc>,
}

impl EffectivenessRecord {
    pub fn new(subject: EffectivenessSubject, outcome: Outcome) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject,
            outcome,
            annotation_density: None,
            learning_mode: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.annotation_density = Some(density);
        self
    }

    pub fn with_learning_mode(mut self, mode: LearningMode) -> Self {
        self.learning_mode = Some(mode);
        self
    }
}
