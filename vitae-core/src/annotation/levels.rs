use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::VitaeError;

/// Five-level ordinal relevance judgment, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Gap,
    Tangential,
    Relevant,
    ExtremelyRelevant,
    CoreStrength,
}

impl Relevance {
    /// Ascending order, weakest to strongest.
    pub const ASCENDING: [Relevance; 5] = [
        Relevance::Gap,
        Relevance::Tangential,
        Relevance::Relevant,
        Relevance::ExtremelyRelevant,
        Relevance::CoreStrength,
    ];
}

/// How the requirement text frames the annotated span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    MustHave,
    NiceToHave,
    Disqualifier,
    Neutral,
}

/// Who asserted the annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSource {
    Human,
    Preset,
    SystemSuggested,
}

/// Review state of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStatus {
    Draft,
    Approved,
    Rejected,
}

impl fmt::Display for AnnotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => f.write_str("draft"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Priority 1 (highest) through 5 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const NORMAL: Priority = Priority(3);
    pub const LOWEST: Priority = Priority(5);

    pub fn new(value: u8) -> Result<Self, VitaeError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(VitaeError::InvalidPriority { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<u8> for Priority {
    type Error = VitaeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}
