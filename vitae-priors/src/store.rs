use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, warn};
use vitae_core::errors::{StorageError, VitaeResult};
use vitae_core::models::{DegradationEvent, EmbeddingSnapshot};
use vitae_core::skill::{normalize_skill, Dimension, SkillConfidence, SkillPriors, SkillValue};
use vitae_core::traits::IPriorsStorage;

pub struct PriorsStore {
    storage: Option<Arc<dyn IPriorsStorage>>,
    pub(crate) snapshot: RwLock<Arc<EmbeddingSnapshot>>,
    /// Serializes rebuilds. Readers never take it.
    pub(crate) rebuild_lock: Mutex<()>,
    /// Fallbacks taken by `get`, until drained.
    degradations: Mutex<Vec<DegradationEvent>>,
}

impl PriorsStore {
    /// Open over a backing store, loading the latest embedding snapshot.
    pub fn new(storage: Arc<dyn IPriorsStorage>) -> Self {
        let snapshot = match storage.load_skill_samples() {
            Ok((version, samples)) => EmbeddingSnapshot::new(version, &samples),
            Err(e) => {
                warn!(error = %e, "could not load skill samples, starting with empty snapshot");
                EmbeddingSnapshot::default()
            }
        };
        Self {
            storage: Some(storage),
            snapshot: RwLock::new(Arc::new(snapshot)),
            rebuild_lock: Mutex::new(()),
            degradations: Mutex::new(Vec::new()),
        }
    }

    /// A store with no backing storage. Reads return zero-confidence priors,
    /// writes fail.
    pub fn detached() -> Self {
        Self {
            storage: None,
            snapshot: RwLock::new(Arc::new(EmbeddingSnapshot::default())),
            rebuild_lock: Mutex::new(()),
            degradations: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn storage(&self) -> VitaeResult<&Arc<dyn IPriorsStorage>> {
        self.storage.as_ref().ok_or_else(|| {
            StorageError::Unavailable {
                reason: "priors store has no backing storage".to_string(),
            }
            .into()
        })
    }

    /// Priors for `skill`, or a zero-confidence default if the skill is
    /// unknown or the store cannot be read. Never fails.
    ///
    /// Each fallback is queued for [`PriorsStore::drain_degradation_events`].
    pub fn get(&self, skill: &str) -> SkillPriors {
        self.try_get(skill).unwrap_or_else(|e| {
            warn!(skill = %skill, error = %e, "priors unreadable, using zero-confidence defaults");
            self.degradations
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(DegradationEvent::now("priors", e.to_string(), "zero-confidence priors"));
            SkillPriors::unobserved(skill)
        })
    }

    /// Take the fallbacks recorded since the last drain.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.degradations.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Fallible read for callers that report degradation themselves.
    pub fn try_get(&self, skill: &str) -> VitaeResult<SkillPriors> {
        let skill = normalize_skill(skill);
        let stored = self.storage()?.get_priors(&skill)?;
        debug!(skill = %skill, found = stored.is_some(), "priors lookup");
        Ok(stored.unwrap_or_else(|| SkillPriors::unobserved(&skill)))
    }

    /// Write a single dimension. Other dimensions and the avoid flag are untouched.
    pub fn upsert(
        &self,
        skill: &str,
        dimension: Dimension,
        value: Option<SkillValue>,
        confidence: f64,
        observation_count: u64,
    ) -> VitaeResult<()> {
        let record = SkillConfidence::new(value, confidence, observation_count);
        self.storage()?
            .upsert_dimension(&normalize_skill(skill), dimension, &record)
    }

    /// Optimistic write: succeeds only if the stored observation count for
    /// this dimension is still `expected_observations`.
    pub fn compare_and_upsert(
        &self,
        skill: &str,
        dimension: Dimension,
        expected_observations: u64,
        record: &SkillConfidence,
    ) -> VitaeResult<bool> {
        self.storage()?.compare_and_upsert(
            &normalize_skill(skill),
            dimension,
            expected_observations,
            record,
        )
    }

    pub fn set_avoid(&self, skill: &str, avoid: bool) -> VitaeResult<()> {
        self.storage()?.set_avoid(&normalize_skill(skill), avoid)
    }

    pub fn list_skills(&self) -> VitaeResult<Vec<String>> {
        self.storage()?.list_skills()
    }

    /// Pin the current embedding snapshot. The returned Arc is unaffected
    /// by later rebuilds.
    pub fn snapshot(&self) -> Arc<EmbeddingSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn embedding_version(&self) -> u64 {
        self.snapshot().version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_core::errors::VitaeError;
    use vitae_core::models::SkillSample;

    /// Storage whose every call fails.
    struct Unreachable;
    impl IPriorsStorage for Unreachable {
        fn get_priors(&self, _skill: &str) -> VitaeResult<Option<SkillPriors>> {
            Err(down())
        }
        fn upsert_dimension(&self, _: &str, _: Dimension, _: &SkillConfidence) -> VitaeResult<()> {
            Err(down())
        }
        fn compare_and_upsert(
            &self,
            _: &str,
            _: Dimension,
            _: u64,
            _: &SkillConfidence,
        ) -> VitaeResult<bool> {
            Err(down())
        }
        fn set_avoid(&self, _: &str, _: bool) -> VitaeResult<()> {
            Err(down())
        }
        fn list_skills(&self) -> VitaeResult<Vec<String>> {
            Err(down())
        }
        fn replace_skill_samples(&self, _: &[SkillSample]) -> VitaeResult<u64> {
            Err(down())
        }
        fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)> {
            Err(down())
        }
    }

    fn down() -> VitaeError {
        StorageError::Unavailable {
            reason: "connection refused".into(),
        }
        .into()
    }

    #[test]
    fn unreachable_store_degrades_to_zero_confidence() {
        let store = PriorsStore::new(Arc::new(Unreachable));
        let priors = store.get("Kubernetes");
        assert_eq!(priors.skill, "kubernetes");
        assert!(priors.is_unobserved());
        assert!(!priors.avoid);
        assert_eq!(store.embedding_version(), 0);

        let events = store.drain_degradation_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].component, "priors");
        assert_eq!(events[0].fallback_used, "zero-confidence priors");
        assert!(store.drain_degradation_events().is_empty());
    }

    #[test]
    fn unreachable_store_surfaces_write_failures() {
        let store = PriorsStore::new(Arc::new(Unreachable));
        assert!(store.try_get("go").is_err());
        assert!(store.set_avoid("go", true).is_err());
        assert!(store
            .upsert("go", Dimension::Relevance, None, 0.5, 1)
            .is_err());
    }

    #[test]
    fn detached_store_reads_zero_and_refuses_writes() {
        let store = PriorsStore::detached();
        assert!(store.get("rust").is_unobserved());
        assert!(matches!(
            store.set_avoid("rust", true),
            Err(VitaeError::StorageError(StorageError::Unavailable { .. }))
        ));
    }
}
