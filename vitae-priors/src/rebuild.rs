//! Skill sample embedding rebuild.
//!
//! Build the next snapshot without holding the read lock, persist it, then
//! swap the Arc. Readers holding the previous Arc keep a consistent view.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError};

use tracing::info;
use vitae_core::errors::VitaeResult;
use vitae_core::models::{EmbeddingSnapshot, SkillSample};
use vitae_core::skill::normalize_skill;
use vitae_core::traits::IEmbeddingProvider;
use vitae_observability::tracing_setup::events;

use crate::PriorsStore;

/// Representative texts per skill, keyed by skill name.
pub type SampleTexts = BTreeMap<String, Vec<String>>;

impl PriorsStore {
    /// Embed up to `max_samples_per_skill` texts per skill and publish them
    /// as a new snapshot. Returns the new version, which the backing store
    /// assigns as one more than the highest version it holds, so stores
    /// sharing a database never publish the same version twice.
    pub fn rebuild_embeddings(
        &self,
        sample_texts_per_skill: &SampleTexts,
        embedder: &dyn IEmbeddingProvider,
        max_samples_per_skill: usize,
    ) -> VitaeResult<u64> {
        let _rebuild = self
            .rebuild_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let span = vitae_observability::rebuild_span!(sample_texts_per_skill.len());
        let _entered = span.enter();

        // Merge texts for skills that normalize to the same id.
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (skill, texts) in sample_texts_per_skill {
            let entry = grouped.entry(normalize_skill(skill)).or_default();
            for text in texts {
                if entry.len() < max_samples_per_skill && !text.trim().is_empty() {
                    entry.push(text.clone());
                }
            }
        }

        let mut samples = Vec::new();
        for (skill, texts) in grouped {
            if texts.is_empty() {
                continue;
            }
            let embeddings = embedder.embed_batch(&texts)?;
            for (text, embedding) in texts.into_iter().zip(embeddings) {
                samples.push(SkillSample {
                    skill: skill.clone(),
                    text,
                    embedding,
                    version: 0,
                });
            }
        }

        let version = self.storage()?.replace_skill_samples(&samples)?;
        for sample in &mut samples {
            sample.version = version;
        }

        let next = Arc::new(EmbeddingSnapshot::new(version, &samples));
        let skill_count = next.skill_count();
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;

        events::embeddings_rebuilt(version, skill_count, samples.len());
        info!(version, provider = embedder.name(), "embedding snapshot swapped");
        Ok(version)
    }
}
