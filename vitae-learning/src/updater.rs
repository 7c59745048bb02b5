//! Confidence updater: the mutation half of the learning workflow.
//!
//! Updates to one skill are serialized in-process by a per-skill mutex and
//! across processes by an optimistic compare-and-upsert on the stored
//! observation count. Different skills proceed in parallel.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, warn};
use vitae_core::config::LearningConfig;
use vitae_core::constants::MAX_UPDATE_ATTEMPTS;
use vitae_core::errors::{VitaeError, VitaeResult};
use vitae_core::models::{FeedbackAction, FeedbackEvent, LearningMode};
use vitae_core::skill::{normalize_skill, Dimension, SkillConfidence, SkillPriors, SkillValue};
use vitae_observability::tracing_setup::events;
use vitae_priors::PriorsStore;

use crate::classifier::classify;
use crate::update::compute_update;

/// What an applied update stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedUpdate {
    /// The mode the update was computed with.
    pub mode: LearningMode,
    pub record: SkillConfidence,
    /// True when this update is the one that set the avoid flag.
    pub avoid_set: bool,
}

pub struct ConfidenceUpdater {
    priors: Arc<PriorsStore>,
    config: LearningConfig,
    skill_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ConfidenceUpdater {
    pub fn new(priors: Arc<PriorsStore>, config: LearningConfig) -> Self {
        Self {
            priors,
            config,
            skill_locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Apply a fixed `mode` to one dimension of `skill`.
    ///
    /// Fails with `ConcurrencyConflict` if the stored record keeps changing
    /// underneath for `MAX_UPDATE_ATTEMPTS` attempts, and with the storage
    /// error if the store cannot be read or written.
    pub fn apply(
        &self,
        skill: &str,
        dimension: Dimension,
        mode: LearningMode,
        new_value: Option<&SkillValue>,
    ) -> VitaeResult<AppliedUpdate> {
        self.apply_with(skill, dimension, new_value, |_| mode)
    }

    /// Classify `event` and apply the result.
    ///
    /// Classification runs under the skill lock against the same read the
    /// update is computed from, so ownership is never judged on priors that
    /// another update of this skill has already replaced.
    ///
    /// When the update calls for the avoid flag and writing it still fails
    /// after retries, the error is returned although the confidence record
    /// is already stored. The flag stays unset, so the next qualifying
    /// event for the skill sets it again.
    pub fn apply_feedback(&self, event: &FeedbackEvent) -> VitaeResult<AppliedUpdate> {
        let new_value = match &event.action {
            FeedbackAction::Edit { new_value } => new_value.as_ref(),
            _ => None,
        };
        self.apply_with(&event.skill, event.dimension, new_value, |priors| {
            classify(event, priors, &self.config)
        })
    }

    /// Read, decide the mode, compute and compare-and-upsert, retrying the
    /// whole sequence when the stored record moved.
    fn apply_with(
        &self,
        skill: &str,
        dimension: Dimension,
        new_value: Option<&SkillValue>,
        decide: impl Fn(&SkillPriors) -> LearningMode,
    ) -> VitaeResult<AppliedUpdate> {
        let skill = normalize_skill(skill);
        let lock = self.lock_for(&skill);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let priors = self.priors.try_get(&skill)?;
            let mode = decide(&priors);
            let current = priors.dimension(dimension);
            let update = compute_update(current, mode, new_value, &self.config);

            if !self.priors.compare_and_upsert(
                &skill,
                dimension,
                current.observation_count,
                &update.record,
            )? {
                warn!(skill = %skill, dimension = %dimension, attempt, "priors changed during update, retrying");
                continue;
            }

            let avoid_set = update.set_avoid && !priors.avoid;
            if avoid_set {
                self.persist_avoid(&skill)?;
                events::avoid_flag_set(
                    &skill,
                    update.record.confidence,
                    update.record.observation_count,
                );
            }
            debug!(
                skill = %skill,
                dimension = %dimension,
                mode = %mode,
                confidence = update.record.confidence,
                observations = update.record.observation_count,
                "confidence updated"
            );
            return Ok(AppliedUpdate {
                mode,
                record: update.record,
                avoid_set,
            });
        }

        Err(VitaeError::ConcurrencyConflict {
            skill,
            attempts: MAX_UPDATE_ATTEMPTS,
        })
    }

    fn persist_avoid(&self, skill: &str) -> VitaeResult<()> {
        let mut attempt = 1;
        loop {
            match self.priors.set_avoid(skill, true) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < MAX_UPDATE_ATTEMPTS => {
                    warn!(skill = %skill, attempt, error = %e, "avoid flag not written, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    warn!(skill = %skill, error = %e, "confidence stored but avoid flag could not be written");
                    return Err(e);
                }
            }
        }
    }

    fn lock_for(&self, skill: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.skill_locks
                .entry(skill.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vitae_core::errors::StorageError;
    use vitae_core::models::SkillSample;
    use vitae_core::traits::IPriorsStorage;

    /// Reads always see the same record and every compare-and-upsert loses.
    struct AlwaysRaced {
        attempts: AtomicUsize,
    }

    impl IPriorsStorage for AlwaysRaced {
        fn get_priors(&self, skill: &str) -> VitaeResult<Option<SkillPriors>> {
            Ok(Some(SkillPriors::unobserved(skill)))
        }
        fn upsert_dimension(&self, _: &str, _: Dimension, _: &SkillConfidence) -> VitaeResult<()> {
            Ok(())
        }
        fn compare_and_upsert(
            &self,
            _: &str,
            _: Dimension,
            _: u64,
            _: &SkillConfidence,
        ) -> VitaeResult<bool> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
        fn set_avoid(&self, _: &str, _: bool) -> VitaeResult<()> {
            Ok(())
        }
        fn list_skills(&self) -> VitaeResult<Vec<String>> {
            Ok(Vec::new())
        }
        fn replace_skill_samples(&self, _: &[SkillSample]) -> VitaeResult<u64> {
            Ok(1)
        }
        fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)> {
            Ok((0, Vec::new()))
        }
    }

    #[test]
    fn lost_races_surface_as_conflict() {
        let storage = Arc::new(AlwaysRaced {
            attempts: AtomicUsize::new(0),
        });
        let updater = ConfidenceUpdater::new(
            Arc::new(PriorsStore::new(storage.clone())),
            LearningConfig::default(),
        );
        let err = updater
            .apply("go", Dimension::Relevance, LearningMode::CorrectPrediction, None)
            .unwrap_err();
        assert!(matches!(
            err,
            VitaeError::ConcurrencyConflict { attempts: MAX_UPDATE_ATTEMPTS, .. }
        ));
        assert_eq!(storage.attempts.load(Ordering::SeqCst), MAX_UPDATE_ATTEMPTS);
    }

    /// A nearly-floored skill whose avoid write fails `failures` times.
    struct FlakyAvoid {
        failures: AtomicUsize,
        avoid_calls: AtomicUsize,
    }

    impl FlakyAvoid {
        fn failing(failures: usize) -> Arc<Self> {
            Arc::new(Self {
                failures: AtomicUsize::new(failures),
                avoid_calls: AtomicUsize::new(0),
            })
        }
    }

    impl IPriorsStorage for FlakyAvoid {
        fn get_priors(&self, skill: &str) -> VitaeResult<Option<SkillPriors>> {
            let mut priors = SkillPriors::unobserved(skill);
            priors.relevance = SkillConfidence::new(Some("relevant".into()), 0.1, 5);
            Ok(Some(priors))
        }
        fn upsert_dimension(&self, _: &str, _: Dimension, _: &SkillConfidence) -> VitaeResult<()> {
            Ok(())
        }
        fn compare_and_upsert(
            &self,
            _: &str,
            _: Dimension,
            _: u64,
            _: &SkillConfidence,
        ) -> VitaeResult<bool> {
            Ok(true)
        }
        fn set_avoid(&self, _: &str, _: bool) -> VitaeResult<()> {
            self.avoid_calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures.load(Ordering::SeqCst);
            if left == 0 {
                return Ok(());
            }
            self.failures.store(left - 1, Ordering::SeqCst);
            Err(StorageError::Unavailable {
                reason: "writer busy".into(),
            }
            .into())
        }
        fn list_skills(&self) -> VitaeResult<Vec<String>> {
            Ok(Vec::new())
        }
        fn replace_skill_samples(&self, _: &[SkillSample]) -> VitaeResult<u64> {
            Ok(1)
        }
        fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)> {
            Ok((0, Vec::new()))
        }
    }

    #[test]
    fn transient_avoid_write_failure_is_retried() {
        let storage = FlakyAvoid::failing(2);
        let updater = ConfidenceUpdater::new(
            Arc::new(PriorsStore::new(storage.clone())),
            LearningConfig::default(),
        );
        let applied = updater
            .apply("cobol", Dimension::Relevance, LearningMode::FullLearning, None)
            .unwrap();
        assert!(applied.avoid_set);
        assert_eq!(storage.avoid_calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn persistent_avoid_write_failure_is_reported() {
        let storage = FlakyAvoid::failing(usize::MAX);
        let updater = ConfidenceUpdater::new(
            Arc::new(PriorsStore::new(storage.clone())),
            LearningConfig::default(),
        );
        let err = updater
            .apply("cobol", Dimension::Relevance, LearningMode::FullLearning, None)
            .unwrap_err();
        assert!(matches!(err, VitaeError::StorageError(StorageError::Unavailable { .. })));
        assert_eq!(storage.avoid_calls.load(Ordering::SeqCst), MAX_UPDATE_ATTEMPTS);
    }

    #[test]
    fn detached_store_reports_failure() {
        let updater = ConfidenceUpdater::new(Arc::new(PriorsStore::detached()), LearningConfig::default());
        assert!(updater
            .apply("go", Dimension::Relevance, LearningMode::FullLearning, None)
            .is_err());
    }
}
