use std::fmt;

use serde::{Deserialize, Serialize};

use crate::skill::{Dimension, SkillValue};

/// Where in the emitted document the user acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// A structured skills list.
    Skills,
    /// A structured requirement / qualifications list.
    Requirements,
    /// Free-text narrative (summary, cover letter body, outreach).
    Narrative,
    Other,
}

/// The section a feedback action happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContext {
    pub kind: SectionKind,
    #[serde(default)]
    pub name: Option<String>,
}

impl SectionContext {
    pub fn skills() -> Self {
        Self {
            kind: SectionKind::Skills,
            name: None,
        }
    }

    pub fn requirements() -> Self {
        Self {
            kind: SectionKind::Requirements,
            name: None,
        }
    }

    pub fn narrative() -> Self {
        Self {
            kind: SectionKind::Narrative,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the section is a structured skill or requirement list.
    pub fn is_skill_section(&self) -> bool {
        matches!(self.kind, SectionKind::Skills | SectionKind::Requirements)
    }
}

/// What the user did with an emitted suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FeedbackAction {
    /// Kept the suggestion unmodified.
    Accept,
    /// Changed the suggested value.
    Edit {
        #[serde(default)]
        new_value: Option<SkillValue>,
    },
    /// Removed the suggestion.
    Delete,
}

/// A user correction on a suggestion tied to one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub skill: String,
    #[serde(default = "default_dimension")]
    pub dimension: Dimension,
    #[serde(flatten)]
    pub action: FeedbackAction,
    pub section: SectionContext,
}

fn default_dimension() -> Dimension {
    Dimension::Relevance
}

impl FeedbackEvent {
    pub fn new(skill: impl Into<String>, action: FeedbackAction, section: SectionContext) -> Self {
        Self {
            skill: skill.into(),
            dimension: Dimension::Relevance,
            action,
            section,
        }
    }

    pub fn on_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }
}

/// How strongly a piece of feedback should move stored confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningMode {
    /// Contextually irrelevant; confidence untouched.
    NoLearning,
    /// Valid skill, surfaced in the wrong place.
    SoftPenalty,
    /// A genuine gap signal.
    FullLearning,
    /// The suggestion was right.
    CorrectPrediction,
    /// The suggested value was wrong but the skill stays.
    WrongPrediction,
}

impl LearningMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoLearning => "NO_LEARNING",
            Self::SoftPenalty => "SOFT_PENALTY",
            Self::FullLearning => "FULL_LEARNING",
            Self::CorrectPrediction => "CORRECT_PREDICTION",
            Self::WrongPrediction => "WRONG_PREDICTION",
        }
    }
}

impl fmt::Display for LearningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
