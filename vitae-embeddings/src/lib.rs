//! # vitae-embeddings
//!
//! The similarity provider: text in, dense vector out, plus cosine
//! similarity between vectors.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── DegradationChain (provider fallback)
//! │   ├── caller-supplied provider (optional)
//! │   └── TfIdfFallback (always available)
//! └── VectorCache (moka, blake3 keys over provider + text)
//! ```

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;
pub mod similarity;

pub use cache::VectorCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use providers::TfIdfFallback;
pub use similarity::{cosine_similarity, max_similarity};
