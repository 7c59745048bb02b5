//! RelevanceEngine: wires storage, priors, embeddings, selection, boosts,
//! learning and effectiveness together.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};
use vitae_boost::{validate_links, BoostCalculator};
use vitae_core::annotation::Annotation;
use vitae_core::config::VitaeConfig;
use vitae_core::errors::VitaeResult;
use vitae_core::models::{
    AchievementCandidate, AchievementRecord, DegradationEvent, EffectivenessRecord,
    EffectivenessSubject, FeedbackEvent, LearningMode, Outcome, Selection, SelectionContext,
    SelectionWarning,
};
use vitae_core::skill::{Dimension, SkillPriors, SkillValue};
use vitae_core::traits::{IAchievementPool, IAnnotationStorage, IEmbeddingProvider, IPriorsStorage};
use vitae_effectiveness::{EffectivenessAggregator, EffectivenessReport, OutcomeStats};
use vitae_embeddings::EmbeddingEngine;
use vitae_learning::LearningEngine;
use vitae_observability::tracing_setup::init_tracing_from_config;
use vitae_observability::{DegradationTracker, TrackedDegradation};
use vitae_priors::{PriorsStore, SampleTexts};
use vitae_selection::CandidateSelector;
use vitae_storage::StorageEngine;

/// Options for building an engine.
#[derive(Default)]
pub struct EngineOptions {
    /// SQLite database path. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration. `None` uses defaults.
    pub config_toml: Option<String>,
    /// Primary similarity provider. The TF-IDF fallback backs it either way.
    pub embedder: Option<Box<dyn IEmbeddingProvider>>,
    /// Backing store for skill priors. `None` keeps them in the engine's
    /// SQLite database next to annotations and outcomes.
    pub priors_storage: Option<Arc<dyn IPriorsStorage>>,
    /// Install the global tracing subscriber from `[observability]` before
    /// anything else is built. Has no effect if a subscriber is already set.
    pub init_tracing: bool,
}

pub struct RelevanceEngine {
    config: VitaeConfig,
    pub(crate) storage: Arc<StorageEngine>,
    priors: Arc<PriorsStore>,
    embeddings: Arc<EmbeddingEngine>,
    selector: CandidateSelector,
    boost: BoostCalculator,
    learning: LearningEngine,
    effectiveness: EffectivenessAggregator,
    pool: Arc<dyn IAchievementPool>,
    degradation: Mutex<DegradationTracker>,
}

impl RelevanceEngine {
    /// Build an engine over `pool`. Configuration is validated before
    /// anything is opened.
    pub fn new(options: EngineOptions, pool: Arc<dyn IAchievementPool>) -> VitaeResult<Self> {
        let mut config = match &options.config_toml {
            Some(toml_str) => VitaeConfig::from_toml(toml_str)?,
            None => VitaeConfig::default(),
        };
        if options.init_tracing {
            init_tracing_from_config(&config.observability);
        }

        let storage = match &options.db_path {
            Some(path) => {
                config.storage.db_path = path.to_string_lossy().into_owned();
                StorageEngine::open_with_config(&config.storage)?
            }
            None => StorageEngine::open_in_memory()?,
        };
        let storage = Arc::new(storage);

        let embeddings = Arc::new(match options.embedder {
            Some(primary) => EmbeddingEngine::with_provider(&config.embedding, primary),
            None => EmbeddingEngine::new(&config.embedding),
        });

        let priors_storage: Arc<dyn IPriorsStorage> = match options.priors_storage {
            Some(external) => external,
            None => storage.clone(),
        };
        let priors = Arc::new(PriorsStore::new(priors_storage));
        let selector = CandidateSelector::new(config.selection.clone(), Arc::clone(&priors))
            .with_embedder(embeddings.clone());

        info!(
            persistent = options.db_path.is_some(),
            provider = embeddings.active_provider(),
            strategy = ?config.boost.conflict_strategy,
            "RelevanceEngine initialized"
        );

        Ok(Self {
            boost: BoostCalculator::new(&config.boost),
            learning: LearningEngine::new(Arc::clone(&priors), config.learning.clone()),
            effectiveness: EffectivenessAggregator::new(storage.clone()),
            selector,
            embeddings,
            priors,
            storage,
            pool,
            degradation: Mutex::new(DegradationTracker::new()),
            config,
        })
    }

    /// In-memory engine with default configuration.
    pub fn in_memory(pool: Arc<dyn IAchievementPool>) -> VitaeResult<Self> {
        Self::new(EngineOptions::default(), pool)
    }

    pub fn config(&self) -> &VitaeConfig {
        &self.config
    }

    /// Rank the pool against `context`, apply active annotation boosts, and
    /// keep the best `top_n` (the configured default when `None`).
    ///
    /// Never fails: unreadable inputs degrade with a warning on the result.
    pub fn select(&self, context: &SelectionContext, top_n: Option<usize>) -> Selection {
        let mut warnings = Vec::new();

        let records = match self.pool.records() {
            Ok(records) => {
                self.recovered("pool");
                records
            }
            Err(e) => {
                self.track("pool", &e.to_string(), "empty pool");
                warnings.push(SelectionWarning::PoolUnavailable {
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };
        let annotations = match self.storage.list_active_annotations() {
            Ok(annotations) => {
                self.recovered("annotations");
                annotations
            }
            Err(e) => {
                self.track("annotations", &e.to_string(), "no annotation boosts");
                warnings.push(SelectionWarning::AnnotationsUnavailable {
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        let mut selection = self
            .selector
            .select(context, &records, &avoid_overrides(&annotations));
        self.track_selection(context, &selection);
        warnings.append(&mut selection.warnings);
        warnings.extend(validate_links(&annotations, &known_ids(&records)));

        let mut candidates = self
            .boost
            .apply_annotation_boost(std::mem::take(&mut selection.candidates), &annotations);
        candidates.truncate(top_n.unwrap_or(self.config.selection.default_top_n));

        self.collect_degradations();
        Selection {
            candidates,
            warnings,
            ..selection
        }
    }

    /// Re-score `candidates` with `annotations`. Inactive annotations are ignored.
    pub fn apply_annotation_boost(
        &self,
        candidates: Vec<AchievementCandidate>,
        annotations: &[Annotation],
    ) -> Vec<AchievementCandidate> {
        self.boost.apply_annotation_boost(candidates, annotations)
    }

    /// Classify and apply one feedback event, then log its outcome.
    ///
    /// An error means the priors were not updated. A failure to log the
    /// outcome afterwards is reported in the logs only.
    pub fn record_feedback(&self, event: &FeedbackEvent) -> VitaeResult<LearningMode> {
        let result = self.learning.record_feedback(event)?;
        self.recovered("priors");
        let outcome = EffectivenessRecord::new(
            EffectivenessSubject::Skill(result.skill.clone()),
            Outcome::from_learning_mode(result.mode),
        )
        .with_learning_mode(result.mode);
        if let Err(e) = self.effectiveness.record(&outcome) {
            warn!(skill = %result.skill, error = %e, "feedback applied but outcome not logged");
        }
        Ok(result.mode)
    }

    /// Stored priors for `skill`; zero-confidence defaults when unknown or
    /// when the store cannot be read.
    pub fn get_skill_confidence(&self, skill: &str) -> SkillPriors {
        let priors = self.priors.get(skill);
        self.collect_degradations();
        priors
    }

    /// Write one dimension of a skill's priors directly, e.g. when seeding
    /// from an import.
    pub fn upsert_priors(
        &self,
        skill: &str,
        dimension: Dimension,
        value: Option<SkillValue>,
        confidence: f64,
        observation_count: u64,
    ) -> VitaeResult<()> {
        self.priors
            .upsert(skill, dimension, value, confidence, observation_count)
    }

    /// Explicitly set or clear the avoid flag.
    pub fn set_avoid(&self, skill: &str, avoid: bool) -> VitaeResult<()> {
        self.priors.set_avoid(skill, avoid)
    }

    /// Embed sample texts per skill and publish them as the next version.
    pub fn rebuild_embeddings(&self, sample_texts_per_skill: &SampleTexts) -> VitaeResult<u64> {
        let version = self.priors.rebuild_embeddings(
            sample_texts_per_skill,
            self.embeddings.as_ref(),
            self.config.embedding.max_samples_per_skill,
        );
        self.collect_degradations();
        version
    }

    /// Whether a rebuild has happened since `selection` was computed.
    pub fn is_stale(&self, selection: &Selection) -> bool {
        selection.embedding_version != self.priors.embedding_version()
    }

    pub fn embedding_version(&self) -> u64 {
        self.priors.embedding_version()
    }

    /// Append a downstream outcome (interview, offer, ...).
    pub fn record_outcome(&self, record: &EffectivenessRecord) -> VitaeResult<()> {
        self.effectiveness.record(record)
    }

    pub fn skill_effectiveness(&self, skill: &str) -> VitaeResult<OutcomeStats> {
        self.effectiveness.skill_stats(skill)
    }

    pub fn effectiveness_report(&self) -> VitaeResult<EffectivenessReport> {
        self.effectiveness.report()
    }

    /// Every degradation seen so far, oldest first.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.tracker().events().to_vec()
    }

    /// Degradations whose component has not served normally since.
    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        self.tracker()
            .active_degradations()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Record the fallbacks a selection reported through its warnings, and
    /// recover components the selection exercised without a fallback.
    fn track_selection(&self, context: &SelectionContext, selection: &Selection) {
        let mut priors_failed = false;
        let mut similarity_failed = false;
        for warning in &selection.warnings {
            match warning {
                SelectionWarning::PriorsUnavailable { reason } => {
                    priors_failed = true;
                    self.track("priors", reason, "unpersonalized selection");
                }
                SelectionWarning::SimilarityUnavailable { reason } => {
                    similarity_failed = true;
                    self.track("similarity", reason, "categorical-only scoring");
                }
                SelectionWarning::TimedOut { scored, total } => {
                    self.track(
                        "selection",
                        &format!("deadline reached after {scored} of {total} records"),
                        "partial ranking",
                    );
                }
                _ => {}
            }
        }

        let read_priors = !context.required_attributes.is_empty() || !context.keywords.is_empty();
        if read_priors && !priors_failed {
            self.recovered("priors");
        }
        if !context.text.trim().is_empty() && !similarity_failed {
            self.recovered("similarity");
        }
        if !selection.timed_out {
            self.recovered("selection");
        }
    }

    /// Move fallbacks queued by the priors store and the embedding chain
    /// into the tracker.
    fn collect_degradations(&self) {
        let mut events = self.priors.drain_degradation_events();
        events.extend(self.embeddings.drain_degradation_events());
        let embeddings_degraded = self.embeddings.is_degraded();

        let mut tracker = self.tracker();
        for event in events {
            tracker.record(event);
        }
        if !embeddings_degraded {
            tracker.mark_recovered("embeddings");
        }
    }

    fn track(&self, component: &str, failure: &str, fallback: &str) {
        self.tracker()
            .record(DegradationEvent::now(component, failure, fallback));
    }

    fn recovered(&self, component: &str) {
        self.tracker().mark_recovered(component);
    }

    fn tracker(&self) -> std::sync::MutexGuard<'_, DegradationTracker> {
        self.degradation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Skills named by an active annotation stay selectable even when avoided.
fn avoid_overrides(annotations: &[Annotation]) -> BTreeSet<String> {
    annotations
        .iter()
        .filter(|a| a.is_active)
        .flat_map(|a| a.linked_skills.iter().cloned())
        .collect()
}

fn known_ids(records: &[AchievementRecord]) -> BTreeSet<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
