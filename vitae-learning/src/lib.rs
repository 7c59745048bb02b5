//! # vitae-learning
//!
//! Feedback → classify → update → possibly avoid.
//!
//! Classification ([`classify`]) and the update rule ([`compute_update`])
//! are pure. [`ConfidenceUpdater`] is the only part that touches the
//! priors store.

pub mod classifier;
pub mod engine;
pub mod update;
pub mod updater;

pub use classifier::classify;
pub use engine::{FeedbackResult, LearningEngine};
pub use update::{compute_update, ConfidenceUpdate};
pub use updater::ConfidenceUpdater;
