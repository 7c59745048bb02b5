//! # vitae-effectiveness
//!
//! Analytics sink for downstream outcomes. Nothing on the selection path
//! reads from here.

pub mod aggregator;
pub mod stats;

pub use aggregator::{EffectivenessAggregator, EffectivenessReport};
pub use stats::{pearson, OutcomeStats};
