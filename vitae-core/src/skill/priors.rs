use serde::{Deserialize, Serialize};

use super::{normalize_skill, Dimension, SkillConfidence};

/// The persistent belief about one skill, independent of any single context.
///
/// Holds exactly one [`SkillConfidence`] per [`Dimension`] plus the
/// explicit `avoid` flag. Owned by the priors store; other components
/// only ever see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPriors {
    pub skill: String,
    pub relevance: SkillConfidence,
    pub passion: SkillConfidence,
    pub identity: SkillConfidence,
    pub requirement: SkillConfidence,
    /// Set only by explicit user action or the full-learning avoid rule.
    pub avoid: bool,
}

impl SkillPriors {
    /// All-zero-confidence priors for a skill that has never been observed.
    pub fn unobserved(skill: &str) -> Self {
        Self {
            skill: normalize_skill(skill),
            relevance: SkillConfidence::unobserved(),
            passion: SkillConfidence::unobserved(),
            identity: SkillConfidence::unobserved(),
            requirement: SkillConfidence::unobserved(),
            avoid: false,
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> &SkillConfidence {
        match dimension {
            Dimension::Relevance => &self.relevance,
            Dimension::Passion => &self.passion,
            Dimension::Identity => &self.identity,
            Dimension::Requirement => &self.requirement,
        }
    }

    pub fn dimension_mut(&mut self, dimension: Dimension) -> &mut SkillConfidence {
        match dimension {
            Dimension::Relevance => &mut self.relevance,
            Dimension::Passion => &mut self.passion,
            Dimension::Identity => &mut self.identity,
            Dimension::Requirement => &mut self.requirement,
        }
    }

    /// True when no dimension has ever been observed.
    pub fn is_unobserved(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| !self.dimension(*d).is_observed())
    }

    /// Total observations across all dimensions.
    pub fn total_observations(&self) -> u64 {
        Dimension::ALL
            .iter()
            .map(|d| self.dimension(*d).observation_count)
            .sum()
    }
}
