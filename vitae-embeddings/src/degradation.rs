//! Fallback chain for embedding generation.
//!
//! Providers are tried in order. Every fallback past the first provider is
//! recorded as a degradation event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::warn;
use vitae_core::errors::{EmbeddingError, VitaeResult};
use vitae_core::models::DegradationEvent;
use vitae_core::traits::IEmbeddingProvider;

/// Ordered provider chain with degradation tracking.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
    /// Whether the most recent successful call was served past the primary.
    degraded: AtomicBool,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds.
    ///
    /// Returns the vector and the name of the provider that produced it.
    pub fn embed(&self, text: &str) -> VitaeResult<(Vec<f32>, &str)> {
        self.run(|p| p.embed(text), "provider failed, trying next in chain")
    }

    /// Batch variant of [`DegradationChain::embed`].
    pub fn embed_batch(&self, texts: &[String]) -> VitaeResult<(Vec<Vec<f32>>, &str)> {
        self.run(
            |p| p.embed_batch(texts),
            "batch embed failed, trying next in chain",
        )
    }

    fn run<T>(
        &self,
        call: impl Fn(&dyn IEmbeddingProvider) -> VitaeResult<T>,
        failure_message: &str,
    ) -> VitaeResult<(T, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }

            match call(provider.as_ref()) {
                Ok(value) => {
                    self.degraded.store(i > 0, Ordering::Relaxed);
                    if i > 0 {
                        let primary_name = self
                            .chain
                            .first()
                            .map(|p| p.name())
                            .unwrap_or("unknown");
                        self.record(DegradationEvent {
                            component: "embeddings".to_string(),
                            failure: format!("{primary_name} unavailable"),
                            fallback_used: provider.name().to_string(),
                            timestamp: Utc::now(),
                        });
                    }
                    return Ok((value, provider.name()));
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "{failure_message}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    fn record(&self, event: DegradationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Name of the first provider in the chain.
    pub fn primary_name(&self) -> &str {
        self.chain.first().map(|p| p.name()).unwrap_or("none")
    }

    /// True when the last successful call fell back past the primary.
    /// Clears as soon as the primary serves again.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
