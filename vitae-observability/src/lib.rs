//! # vitae-observability
//!
//! Structured tracing with span definitions, one event function per key
//! operation, and degradation event tracking.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
