use vitae_core::annotation::{Annotation, AnnotationSpan};
use vitae_core::models::AchievementCandidate;
use vitae_core::skill::normalize_skill;

/// What an aggregate boost is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoostTarget {
    Achievement(String),
    Skill(String),
    PainPoint(String),
    /// Every annotation whose span overlaps this one.
    Span(AnnotationSpan),
}

impl BoostTarget {
    /// Whether `annotation` bears on this target. Activity is not checked.
    pub fn matches(&self, annotation: &Annotation) -> bool {
        match self {
            Self::Achievement(id) => annotation.linked_achievement_ids.iter().any(|a| a == id),
            Self::Skill(skill) => annotation.names_skill(&normalize_skill(skill)),
            Self::PainPoint(text) => annotation
                .linked_pain_points
                .iter()
                .any(|p| same_text(p, text)),
            Self::Span(span) => annotation.span.overlaps(span),
        }
    }
}

/// Whether `annotation` applies to `candidate` by achievement id, by a
/// skill among the candidate's tags, or by a pain point it addresses.
pub(crate) fn applies_to_candidate(annotation: &Annotation, candidate: &AchievementCandidate) -> bool {
    annotation
        .linked_achievement_ids
        .iter()
        .any(|id| *id == candidate.achievement_id)
        || candidate
            .tags
            .iter()
            .any(|tag| annotation.names_skill(&normalize_skill(tag)))
        || annotation.linked_pain_points.iter().any(|p| {
            candidate
                .addressed_requirements
                .iter()
                .any(|r| same_text(p, r))
        })
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
