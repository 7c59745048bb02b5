//! # vitae-engine
//!
//! [`RelevanceEngine`] owns every subsystem and exposes the consumer
//! operations: selection with annotation boosts, feedback recording,
//! confidence queries, annotation lifecycle, embedding rebuilds, and
//! effectiveness reporting.

mod annotations;
pub mod engine;

pub use engine::{EngineOptions, RelevanceEngine};
pub use vitae_effectiveness::EffectivenessReport;
pub use vitae_priors::SampleTexts;
