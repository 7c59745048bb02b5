use serde::{Deserialize, Serialize};

use super::AchievementCandidate;

/// A data-quality issue recovered locally during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// No similarity provider, or it failed; categorical-only scoring.
    SimilarityUnavailable { reason: String },
    /// A record had no usable summary vector.
    MissingEmbedding { achievement_id: String },
    /// The achievement pool could not be read.
    PoolUnavailable { reason: String },
    /// Priors could not be read; scoring ran unpersonalized.
    PriorsUnavailable { reason: String },
    /// Annotations could not be read; no boosts were applied.
    AnnotationsUnavailable { reason: String },
    /// An annotation linked to an achievement that is not in the pool.
    DanglingAnnotationLink {
        annotation_id: String,
        achievement_id: String,
    },
    /// A skill was left out because it carries the avoid flag.
    SkillAvoided { skill: String },
    /// The deadline passed; the list holds what was scored before it.
    TimedOut { scored: usize, total: usize },
}

/// The result of one selection call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Ranked best first.
    pub candidates: Vec<AchievementCandidate>,
    pub warnings: Vec<SelectionWarning>,
    pub timed_out: bool,
    /// Skill-sample embedding version the selection was pinned to.
    pub embedding_version: u64,
}

impl Selection {
    pub fn ids(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|c| c.achievement_id.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}
