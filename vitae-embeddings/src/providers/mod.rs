//! Provider registry.
//!
//! Only the TF-IDF provider is built in. Callers with a neural model wrap
//! it in `IEmbeddingProvider` and hand it to `EmbeddingEngine::with_provider`.

pub mod tfidf_fallback;

pub use tfidf_fallback::TfIdfFallback;

use tracing::{info, warn};
use vitae_core::config::EmbeddingConfig;
use vitae_core::traits::IEmbeddingProvider;

/// Create the configured built-in provider, returning it boxed.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "tfidf" => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
        }
        other => {
            warn!(
                provider = other,
                "provider is not built in, using TF-IDF fallback"
            );
        }
    }
    Box::new(TfIdfFallback::new(config.dimensions))
}
