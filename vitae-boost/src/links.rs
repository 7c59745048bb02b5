use std::collections::BTreeSet;

use vitae_core::annotation::Annotation;
use vitae_core::models::SelectionWarning;
use vitae_observability::tracing_setup::events;

/// One warning per active annotation link to an achievement outside `known_ids`.
/// The link is skipped; nothing else about the annotation changes.
pub fn validate_links(annotations: &[Annotation], known_ids: &BTreeSet<String>) -> Vec<SelectionWarning> {
    let mut warnings = Vec::new();
    for annotation in annotations.iter().filter(|a| a.is_active) {
        for achievement_id in &annotation.linked_achievement_ids {
            if !known_ids.contains(achievement_id) {
                events::annotation_link_skipped(&annotation.id, achievement_id);
                warnings.push(SelectionWarning::DanglingAnnotationLink {
                    annotation_id: annotation.id.clone(),
                    achievement_id: achievement_id.clone(),
                });
            }
        }
    }
    warnings
}
