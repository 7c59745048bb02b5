//! Degradation tracking: every fallback taken is recorded with its recovery status.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
