pub mod confidence;
pub mod dimension;
pub mod priors;

pub use confidence::{SkillConfidence, SkillValue};
pub use dimension::Dimension;
pub use priors::SkillPriors;

/// Canonical form of a skill identifier: trimmed, lowercase.
///
/// All stores and lookups key on this form so "Kubernetes" and
/// " kubernetes " resolve to the same priors.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}
