//! Fixed multiplier tables.

use vitae_core::annotation::{
    Annotation, AnnotationKind, AnnotationSource, Priority, Relevance, RequirementType,
};

pub fn relevance_multiplier(relevance: Relevance) -> f64 {
    match relevance {
        Relevance::CoreStrength => 3.0,
        Relevance::ExtremelyRelevant => 2.0,
        Relevance::Relevant => 1.5,
        Relevance::Tangential => 1.0,
        Relevance::Gap => 0.3,
    }
}

pub fn requirement_multiplier(requirement_type: RequirementType) -> f64 {
    match requirement_type {
        RequirementType::MustHave => 1.5,
        RequirementType::NiceToHave => 1.0,
        RequirementType::Disqualifier => 0.0,
        RequirementType::Neutral => 1.0,
    }
}

pub fn priority_multiplier(priority: Priority) -> f64 {
    match priority.value() {
        1 => 1.5,
        2 => 1.3,
        3 => 1.0,
        4 => 0.8,
        _ => 0.6,
    }
}

/// Unknown kinds are neutral.
pub fn type_multiplier(kind: &AnnotationKind) -> f64 {
    match kind {
        AnnotationKind::SkillMatch => 1.0,
        AnnotationKind::Reframe { .. } => 1.2,
        AnnotationKind::Highlight => 0.8,
        AnnotationKind::Comment { .. } => 0.5,
        AnnotationKind::Concern { .. } => 0.0,
        AnnotationKind::Unknown => 1.0,
    }
}

pub fn source_multiplier(source: AnnotationSource) -> f64 {
    match source {
        AnnotationSource::Human => 1.2,
        AnnotationSource::Preset => 1.1,
        AnnotationSource::SystemSuggested => 1.0,
    }
}

/// Boost of a single annotation, ignoring whether it is active.
pub fn compute_boost(annotation: &Annotation) -> f64 {
    relevance_multiplier(annotation.relevance)
        * requirement_multiplier(annotation.requirement_type)
        * priority_multiplier(annotation.priority)
        * type_multiplier(&annotation.kind)
        * source_multiplier(annotation.source)
}
