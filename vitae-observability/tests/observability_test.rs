use vitae_core::config::ObservabilityConfig;
use vitae_core::models::DegradationEvent;
use vitae_observability::tracing_setup::{init_tracing, init_tracing_from_config, spans};
use vitae_observability::{DegradationTracker, RecoveryStatus};

fn event(component: &str) -> DegradationEvent {
    DegradationEvent::now(component, "store unreachable", "zero-confidence priors")
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing_from_config(&ObservabilityConfig {
        log_level: "debug".into(),
        json: false,
    });
    init_tracing();
    let span = vitae_observability::selection_span!(5usize, 2usize);
    let _guard = span.enter();
    vitae_observability::tracing_setup::events::feedback_classified("php", "relevance", "FULL_LEARNING");
}

#[test]
fn span_names_are_namespaced() {
    assert_eq!(spans::names::SELECTION, "vitae.selection");
    assert_eq!(spans::names::FEEDBACK, "vitae.feedback");
    assert_eq!(spans::names::REBUILD, "vitae.rebuild");
}

#[test]
fn tracker_records_and_recovers() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event("priors"));
    tracker.record(event("embeddings"));
    assert_eq!(tracker.active_degradations().len(), 2);

    tracker.mark_recovered("priors");
    let active = tracker.active_degradations();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event.component, "embeddings");
    assert_eq!(tracker.events()[0].recovery_status, RecoveryStatus::Recovered);
    assert!(tracker.events()[0].recovered_at.is_some());
}

#[test]
fn recovery_clears_every_active_event_of_the_component() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event("priors"));
    tracker.record(event("priors"));
    tracker.record(event("pool"));

    tracker.mark_recovered("priors");
    let active = tracker.active_degradations();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event.component, "pool");
    assert!(tracker.events()[..2]
        .iter()
        .all(|t| t.recovery_status == RecoveryStatus::Recovered));

    tracker.record(event("priors"));
    assert_eq!(tracker.active_degradations().len(), 2);
}
