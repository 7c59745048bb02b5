//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the learning mode chosen for a feedback event.
pub fn feedback_classified(skill: &str, dimension: &str, mode: &str) {
    tracing::info!(
        event = "feedback_classified",
        skill = %skill,
        dimension = %dimension,
        mode = %mode,
        "feedback classified"
    );
}

/// Log a skill being flagged as avoided.
pub fn avoid_flag_set(skill: &str, confidence: f64, observation_count: u64) {
    tracing::warn!(
        event = "avoid_flag_set",
        skill = %skill,
        confidence = confidence,
        observation_count = observation_count,
        "skill flagged as avoided"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log an annotation link that points at an unknown achievement.
pub fn annotation_link_skipped(annotation_id: &str, achievement_id: &str) {
    tracing::warn!(
        event = "annotation_link_skipped",
        annotation_id = %annotation_id,
        achievement_id = %achievement_id,
        "annotation links to unknown achievement, skipped"
    );
}

/// Log completion of an embedding rebuild.
pub fn embeddings_rebuilt(version: u64, skills: usize, samples: usize) {
    tracing::info!(
        event = "embeddings_rebuilt",
        version = version,
        skills = skills,
        samples = samples,
        "skill embeddings rebuilt"
    );
}

/// Log a selection that hit its deadline.
pub fn selection_timed_out(scored: usize, total: usize, timeout_ms: u64) {
    tracing::warn!(
        event = "selection_timed_out",
        scored = scored,
        total = total,
        timeout_ms = timeout_ms,
        "selection deadline reached, returning partial ranking"
    );
}
