//! EmbeddingEngine: the main entry point for vitae-embeddings.
//!
//! Coordinates the provider fallback chain and the L1 cache.
//! Implements `IEmbeddingProvider` so it can stand in wherever a provider is expected.

use tracing::{debug, info};
use vitae_core::config::EmbeddingConfig;
use vitae_core::errors::VitaeResult;
use vitae_core::models::DegradationEvent;
use vitae_core::traits::IEmbeddingProvider;

use crate::cache::VectorCache;
use crate::degradation::DegradationChain;
use crate::providers;

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: VectorCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create an engine from configuration using the built-in providers.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        chain.push(providers::create_provider(config));
        Self::finish(chain, config.dimensions, config.l1_cache_size)
    }

    /// Create an engine whose primary provider is `primary`, falling back to
    /// TF-IDF at the primary's dimensionality.
    pub fn with_provider(config: &EmbeddingConfig, primary: Box<dyn IEmbeddingProvider>) -> Self {
        let dimensions = primary.dimensions();
        let mut chain = DegradationChain::new();
        chain.push(primary);
        chain.push(Box::new(providers::TfIdfFallback::new(dimensions)));
        Self::finish(chain, dimensions, config.l1_cache_size)
    }

    fn finish(chain: DegradationChain, dimensions: usize, l1_cache_size: u64) -> Self {
        info!(
            provider = chain.active_provider_name(),
            dims = dimensions,
            "EmbeddingEngine initialized"
        );
        Self {
            chain,
            cache: VectorCache::new(l1_cache_size),
            dimensions,
        }
    }

    /// Embed text through the cache.
    ///
    /// Only vectors produced by the primary provider are cached, so a
    /// transient fallback never pins lower-quality vectors.
    pub fn embed_text(&self, text: &str) -> VitaeResult<Vec<f32>> {
        let primary = self.chain.primary_name();
        if let Some(vec) = self.cache.lookup(primary, text) {
            debug!(provider = primary, "vector cache hit");
            return Ok(vec);
        }

        let (embedding, provider) = self.chain.embed(text)?;
        if provider == primary {
            self.cache.store(primary, text, embedding.clone());
        }
        Ok(embedding)
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// True while the primary provider is being bypassed.
    pub fn is_degraded(&self) -> bool {
        self.chain.is_degraded()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> VitaeResult<Vec<f32>> {
        self.embed_text(text)
    }

    fn embed_batch(&self, texts: &[String]) -> VitaeResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "vitae-embedding-engine"
    }

    fn is_available(&self) -> bool {
        !self.chain.is_empty()
    }
}
