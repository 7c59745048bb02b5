//! # vitae-priors
//!
//! The priors store: the only owner of persistent skill confidence.
//!
//! Reads never fail (an unreachable store yields zero-confidence priors).
//! Writes touch one `(skill, dimension)` field at a time. Skill sample
//! embeddings are held as an immutable, versioned snapshot that a rebuild
//! swaps atomically, so an in-flight selection keeps the version it started with.

mod rebuild;
mod store;

pub use rebuild::SampleTexts;
pub use store::PriorsStore;
