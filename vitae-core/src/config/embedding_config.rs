use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider name. "tfidf" is built in; others are registered by callers.
    pub provider: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
    /// Sample texts embedded per skill on rebuild.
    pub max_samples_per_skill: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            max_samples_per_skill: defaults::DEFAULT_MAX_SAMPLES_PER_SKILL,
        }
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions == 0 {
            return Err(super::out_of_range(
                "embedding.dimensions",
                self.dimensions,
                "must be at least 1",
            ));
        }
        if self.max_samples_per_skill == 0 {
            return Err(super::out_of_range(
                "embedding.max_samples_per_skill",
                self.max_samples_per_skill,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
