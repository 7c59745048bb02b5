//! # vitae-boost
//!
//! Annotation boosts. Each active annotation yields the product of five
//! table multipliers; annotations competing for one target are resolved by
//! the configured [`ConflictStrategy`](vitae_core::config::ConflictStrategy).

pub mod calculator;
pub mod links;
pub mod multipliers;
pub mod target;

pub use calculator::BoostCalculator;
pub use links::validate_links;
pub use multipliers::compute_boost;
pub use target::BoostTarget;
