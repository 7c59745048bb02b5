//! # vitae-selection
//!
//! Ranks achievement records against a requirement context.
//!
//! `base_score = tag signal + requirement-token signal + similarity signal`,
//! each signal capped, so the base score stays within roughly [0, 3].
//! Equal scores prefer a source not yet represented in the ranking.

pub mod diversity;
pub mod selector;
pub mod signals;
pub mod tokens;

pub use diversity::rank_with_diversity;
pub use selector::CandidateSelector;
