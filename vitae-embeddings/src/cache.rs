//! In-memory cache of primary-provider vectors.
//!
//! Keys hash the provider name together with the text, so a vector from one
//! embedding space is never served for another.

use std::time::Duration;

use moka::sync::Cache;

const IDLE_EVICTION: Duration = Duration::from_secs(3600);

/// blake3 digest of `(provider, text)`.
pub type VectorKey = [u8; 32];

pub struct VectorCache {
    vectors: Cache<VectorKey, Vec<f32>>,
}

impl VectorCache {
    /// A cache holding at most `capacity` vectors. Zero disables caching.
    pub fn new(capacity: u64) -> Self {
        Self {
            vectors: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(IDLE_EVICTION)
                .build(),
        }
    }

    pub fn key(provider: &str, text: &str) -> VectorKey {
        let mut hasher = blake3::Hasher::new();
        hasher.update(provider.as_bytes());
        // Separator keeps ("ab", "c") and ("a", "bc") apart.
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        *hasher.finalize().as_bytes()
    }

    pub fn lookup(&self, provider: &str, text: &str) -> Option<Vec<f32>> {
        self.vectors.get(&Self::key(provider, text))
    }

    pub fn store(&self, provider: &str, text: &str, vector: Vec<f32>) {
        self.vectors.insert(Self::key(provider, text), vector);
    }
}
