//! Span definitions per operation: selection, feedback, rebuild.

/// Create a selection span.
#[macro_export]
macro_rules! selection_span {
    ($top_n:expr, $attributes:expr) => {
        tracing::info_span!("vitae.selection", top_n = $top_n, attributes = $attributes)
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($skill:expr, $dimension:expr) => {
        tracing::info_span!("vitae.feedback", skill = %$skill, dimension = %$dimension)
    };
}

/// Create an embedding rebuild span.
#[macro_export]
macro_rules! rebuild_span {
    ($skills:expr) => {
        tracing::info_span!("vitae.rebuild", skills = $skills)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SELECTION: &str = "vitae.selection";
    pub const FEEDBACK: &str = "vitae.feedback";
    pub const REBUILD: &str = "vitae.rebuild";
}
