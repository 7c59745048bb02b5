use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use test_fixtures::load_fixture;
use vitae_core::annotation::{
    Annotation, AnnotationKind, AnnotationSpan, AnnotationStatus, Priority, Relevance,
    RequirementType,
};
use vitae_core::errors::{EmbeddingError, StorageError, VitaeError, VitaeResult};
use vitae_core::models::{
    AchievementRecord, FeedbackAction, FeedbackEvent, LearningMode, SectionContext,
    SelectionContext, SelectionWarning, SkillSample,
};
use vitae_core::skill::{Dimension, SkillConfidence, SkillPriors};
use vitae_core::traits::{IAchievementPool, IEmbeddingProvider, IPriorsStorage, StaticPool};
use vitae_engine::{EngineOptions, RelevanceEngine, SampleTexts};
use vitae_storage::StorageEngine;

fn pool() -> Vec<AchievementRecord> {
    load_fixture("golden/selection/achievement_pool.json")
}

fn context() -> SelectionContext {
    load_fixture("golden/selection/platform_context.json")
}

fn engine() -> RelevanceEngine {
    RelevanceEngine::in_memory(Arc::new(StaticPool::new(pool()))).unwrap()
}

fn kubernetes_core_strength() -> Annotation {
    Annotation::human(
        AnnotationSpan::new("Kubernetes", 97, 107),
        AnnotationKind::SkillMatch,
        Relevance::CoreStrength,
        RequirementType::MustHave,
        Priority::HIGHEST,
    )
    .with_achievement("acme-k8s-migration")
}

#[test]
fn core_strength_annotation_boosts_kubernetes_achievement() {
    let engine = engine();
    engine
        .upsert_priors("Kubernetes", Dimension::Relevance, Some("relevant".into()), 0.9, 4)
        .unwrap();
    engine.create_annotation(&kubernetes_core_strength()).unwrap();

    let selection = engine.select(&context(), None);
    let top = &selection.candidates[0];
    assert_eq!(top.achievement_id, "acme-k8s-migration");
    assert!((top.boost_factor - 6.75 * 1.2).abs() < 1e-9);
    assert!(top.final_score >= top.base_score * 6.75 * 1.2 - 1e-9);
    assert_eq!(top.breakdown["prior:kubernetes"], 0.9);
}

#[test]
fn selection_truncates_to_top_n() {
    let engine = engine();
    assert_eq!(engine.select(&context(), None).len(), 5);
    assert_eq!(engine.select(&context(), Some(2)).len(), 2);
    assert!(engine.select(&context(), Some(0)).is_empty());
}

#[test]
fn selection_is_deterministic() {
    let engine = engine();
    engine.create_annotation(&kubernetes_core_strength()).unwrap();
    let a = engine.select(&context(), Some(6));
    let b = engine.select(&context(), Some(6));
    assert_eq!(a, b);
}

#[test]
fn php_deletion_in_qualifications_is_full_learning() {
    let engine = engine();
    let events: Vec<FeedbackEvent> = load_fixture("golden/feedback/deletions.json");

    let mode = engine.record_feedback(&events[0]).unwrap();
    assert_eq!(mode, LearningMode::FullLearning);
    let php = engine.get_skill_confidence("PHP");
    assert_eq!(php.relevance.observation_count, 1);
    assert_eq!(php.relevance.confidence, engine.config().learning.min_confidence);

    assert_eq!(engine.record_feedback(&events[1]).unwrap(), LearningMode::NoLearning);
    assert_eq!(engine.record_feedback(&events[2]).unwrap(), LearningMode::WrongPrediction);

    let report = engine.effectiveness_report().unwrap();
    assert_eq!(report.skills["php"].hard_deleted, 1);
    assert_eq!(report.skills["figma"].soft_deleted, 1);
    assert_eq!(report.skills["go"].edited, 1);
}

#[test]
fn avoided_skill_is_suppressed_until_annotated() {
    let engine = engine();
    let delete_go = FeedbackEvent::new("Go", FeedbackAction::Delete, SectionContext::skills());
    for _ in 0..4 {
        assert_eq!(engine.record_feedback(&delete_go).unwrap(), LearningMode::FullLearning);
    }
    assert!(engine.get_skill_confidence("go").avoid);

    let selection = engine.select(&context(), Some(6));
    assert!(selection
        .warnings
        .contains(&SelectionWarning::SkillAvoided { skill: "go".into() }));
    let ci = selection
        .candidates
        .iter()
        .find(|c| c.achievement_id == "globex-ci")
        .unwrap();
    assert_eq!(ci.breakdown["tag_overlap"], 0.0);

    let override_go = Annotation::human(
        AnnotationSpan::new("Go", 0, 2),
        AnnotationKind::SkillMatch,
        Relevance::Relevant,
        RequirementType::NiceToHave,
        Priority::NORMAL,
    )
    .with_skill("Go");
    engine.create_annotation(&override_go).unwrap();

    let selection = engine.select(&context(), Some(6));
    assert!(!selection
        .warnings
        .iter()
        .any(|w| matches!(w, SelectionWarning::SkillAvoided { .. })));
    let ci = selection
        .candidates
        .iter()
        .find(|c| c.achievement_id == "globex-ci")
        .unwrap();
    assert_eq!(ci.breakdown["tag_overlap"], 1.0);
}

#[test]
fn dangling_link_warns_without_failing() {
    let engine = engine();
    engine
        .create_annotation(&kubernetes_core_strength().with_achievement("retired-record"))
        .unwrap();
    let selection = engine.select(&context(), None);
    assert!(selection.warnings.iter().any(|w| matches!(
        w,
        SelectionWarning::DanglingAnnotationLink { achievement_id, .. } if achievement_id == "retired-record"
    )));
    assert_eq!(selection.candidates[0].achievement_id, "acme-k8s-migration");
}

#[test]
fn rebuild_marks_earlier_selections_stale() {
    let engine = engine();
    let before = engine.select(&context(), None);
    assert!(!engine.is_stale(&before));

    let mut texts = SampleTexts::new();
    texts.insert(
        "Kubernetes".into(),
        vec!["Operated Kubernetes clusters in production".into()],
    );
    let version = engine.rebuild_embeddings(&texts).unwrap();
    assert_eq!(version, before.embedding_version + 1);
    assert!(engine.is_stale(&before));

    let after = engine.select(&context(), None);
    assert_eq!(after.embedding_version, version);
    assert!(!engine.is_stale(&after));
}

#[test]
fn annotation_lifecycle_persists() {
    let engine = engine();
    let suggestion = Annotation::system_suggestion(
        AnnotationSpan::new("Terraform", 0, 9),
        AnnotationKind::Highlight,
        Relevance::Relevant,
        RequirementType::NiceToHave,
        Priority::NORMAL,
    );
    engine.create_annotation(&suggestion).unwrap();

    let approved = engine.approve_annotation(&suggestion.id).unwrap();
    assert_eq!(approved.status, AnnotationStatus::Approved);

    let rejected = engine.reject_annotation(&suggestion.id).unwrap();
    assert!(!rejected.is_active);
    assert!(engine.list_active_annotations().unwrap().is_empty());
    assert_eq!(engine.list_all_annotations().unwrap().len(), 1);

    assert!(matches!(
        engine.approve_annotation(&suggestion.id),
        Err(VitaeError::InvalidTransition { .. })
    ));
    assert!(matches!(
        engine.deactivate_annotation("missing"),
        Err(VitaeError::AnnotationNotFound { .. })
    ));
}

#[test]
fn inactive_annotations_do_not_boost() {
    let engine = engine();
    let annotation = kubernetes_core_strength();
    engine.create_annotation(&annotation).unwrap();
    engine.deactivate_annotation(&annotation.id).unwrap();

    let selection = engine.select(&context(), None);
    assert!(selection.candidates.iter().all(|c| c.boost_factor == 1.0));
}

#[test]
fn priors_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("vitae.db");
    let open = || {
        RelevanceEngine::new(
            EngineOptions {
                db_path: Some(db_path.clone()),
                ..Default::default()
            },
            Arc::new(StaticPool::new(pool())),
        )
        .unwrap()
    };

    {
        let engine = open();
        let event = FeedbackEvent::new("Rust", FeedbackAction::Accept, SectionContext::skills());
        engine.record_feedback(&event).unwrap();
    }
    let engine = open();
    let rust = engine.get_skill_confidence("rust");
    assert_eq!(rust.relevance.observation_count, 1);
    assert_eq!(engine.skill_effectiveness("rust").unwrap().accepted, 1);
}

#[test]
fn invalid_config_fails_at_construction() {
    let result = RelevanceEngine::new(
        EngineOptions {
            config_toml: Some("[learning]\nfull_penalty_multiplier = 1.5\n".into()),
            ..Default::default()
        },
        Arc::new(StaticPool::default()),
    );
    assert!(matches!(result, Err(VitaeError::ConfigError(_))));
}

struct UnreachablePool;

impl IAchievementPool for UnreachablePool {
    fn records(&self) -> VitaeResult<Vec<AchievementRecord>> {
        Err(StorageError::Unavailable {
            reason: "ingestion offline".into(),
        }
        .into())
    }
}

#[test]
fn unreachable_pool_degrades_to_empty_selection() {
    let engine = RelevanceEngine::in_memory(Arc::new(UnreachablePool)).unwrap();
    let selection = engine.select(&context(), None);
    assert!(selection.is_empty());
    assert!(selection
        .warnings
        .iter()
        .any(|w| matches!(w, SelectionWarning::PoolUnavailable { .. })));
    assert_eq!(engine.degradations()[0].event.component, "pool");
}

struct BrokenProvider;

impl IEmbeddingProvider for BrokenProvider {
    fn embed(&self, _text: &str) -> VitaeResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "model not loaded".into(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        128
    }
    fn name(&self) -> &str {
        "broken"
    }
    fn is_available(&self) -> bool {
        false
    }
}

#[test]
fn failing_primary_provider_falls_back_and_is_tracked() {
    let engine = RelevanceEngine::new(
        EngineOptions {
            embedder: Some(Box::new(BrokenProvider)),
            ..Default::default()
        },
        Arc::new(StaticPool::new(pool())),
    )
    .unwrap();

    let selection = engine.select(&context(), None);
    assert!(!selection
        .warnings
        .iter()
        .any(|w| matches!(w, SelectionWarning::SimilarityUnavailable { .. })));
    assert_eq!(selection.candidates[0].achievement_id, "acme-k8s-migration");
    assert!(!engine.degradations().is_empty());
}

fn offline() -> VitaeError {
    StorageError::Unavailable {
        reason: "connection refused".into(),
    }
    .into()
}

/// Priors over an in-memory database that can be taken offline.
struct SwitchablePriors {
    inner: StorageEngine,
    up: Arc<AtomicBool>,
}

impl SwitchablePriors {
    fn check(&self) -> VitaeResult<()> {
        if self.up.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(offline())
        }
    }
}

impl IPriorsStorage for SwitchablePriors {
    fn get_priors(&self, skill: &str) -> VitaeResult<Option<SkillPriors>> {
        self.check()?;
        self.inner.get_priors(skill)
    }
    fn upsert_dimension(
        &self,
        skill: &str,
        dimension: Dimension,
        confidence: &SkillConfidence,
    ) -> VitaeResult<()> {
        self.check()?;
        self.inner.upsert_dimension(skill, dimension, confidence)
    }
    fn compare_and_upsert(
        &self,
        skill: &str,
        dimension: Dimension,
        expected_observations: u64,
        confidence: &SkillConfidence,
    ) -> VitaeResult<bool> {
        self.check()?;
        self.inner
            .compare_and_upsert(skill, dimension, expected_observations, confidence)
    }
    fn set_avoid(&self, skill: &str, avoid: bool) -> VitaeResult<()> {
        self.check()?;
        self.inner.set_avoid(skill, avoid)
    }
    fn list_skills(&self) -> VitaeResult<Vec<String>> {
        self.check()?;
        self.inner.list_skills()
    }
    fn replace_skill_samples(&self, samples: &[SkillSample]) -> VitaeResult<u64> {
        self.check()?;
        self.inner.replace_skill_samples(samples)
    }
    fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)> {
        self.check()?;
        self.inner.load_skill_samples()
    }
}

fn engine_with_priors(up: &Arc<AtomicBool>) -> RelevanceEngine {
    let priors = SwitchablePriors {
        inner: StorageEngine::open_in_memory().unwrap(),
        up: Arc::clone(up),
    };
    RelevanceEngine::new(
        EngineOptions {
            priors_storage: Some(Arc::new(priors)),
            ..Default::default()
        },
        Arc::new(StaticPool::new(pool())),
    )
    .unwrap()
}

fn active_components(engine: &RelevanceEngine) -> Vec<String> {
    engine
        .active_degradations()
        .into_iter()
        .map(|t| t.event.component)
        .collect()
}

#[test]
fn unreadable_priors_during_selection_are_tracked_until_recovery() {
    let up = Arc::new(AtomicBool::new(false));
    let engine = engine_with_priors(&up);

    let selection = engine.select(&context(), None);
    assert!(!selection.is_empty());
    assert!(selection
        .warnings
        .iter()
        .any(|w| matches!(w, SelectionWarning::PriorsUnavailable { .. })));
    let tracked: Vec<_> = engine
        .degradations()
        .into_iter()
        .filter(|t| t.event.component == "priors")
        .collect();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].event.fallback_used, "unpersonalized selection");
    assert_eq!(active_components(&engine), ["priors"]);

    up.store(true, Ordering::SeqCst);
    let selection = engine.select(&context(), None);
    assert!(!selection
        .warnings
        .iter()
        .any(|w| matches!(w, SelectionWarning::PriorsUnavailable { .. })));
    assert!(active_components(&engine).is_empty());
    assert_eq!(engine.degradations().len(), 1);
}

#[test]
fn zero_confidence_fallback_on_lookup_is_tracked() {
    let up = Arc::new(AtomicBool::new(false));
    let engine = engine_with_priors(&up);

    let priors = engine.get_skill_confidence("Go");
    assert!(priors.is_unobserved());
    let degradations = engine.degradations();
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].event.component, "priors");
    assert_eq!(degradations[0].event.fallback_used, "zero-confidence priors");

    up.store(true, Ordering::SeqCst);
    let events: Vec<FeedbackEvent> = load_fixture("golden/feedback/deletions.json");
    engine.record_feedback(&events[0]).unwrap();
    assert!(active_components(&engine).is_empty());
}

/// Pool whose reads fail until switched back on.
struct FlakyPool {
    up: Arc<AtomicBool>,
}

impl IAchievementPool for FlakyPool {
    fn records(&self) -> VitaeResult<Vec<AchievementRecord>> {
        if self.up.load(Ordering::SeqCst) {
            Ok(pool())
        } else {
            Err(offline())
        }
    }
}

#[test]
fn pool_recovery_clears_active_degradation() {
    let up = Arc::new(AtomicBool::new(false));
    let engine = RelevanceEngine::in_memory(Arc::new(FlakyPool {
        up: Arc::clone(&up),
    }))
    .unwrap();

    assert!(engine.select(&context(), None).is_empty());
    assert!(engine.select(&context(), None).is_empty());
    assert_eq!(active_components(&engine), ["pool", "pool"]);

    up.store(true, Ordering::SeqCst);
    assert!(!engine.select(&context(), None).is_empty());
    assert!(active_components(&engine).is_empty());
    assert_eq!(engine.degradations().len(), 2);
}

#[test]
fn engine_installs_tracing_from_config_when_asked() {
    let engine = RelevanceEngine::new(
        EngineOptions {
            config_toml: Some("[observability]\nlog_level = \"debug\"\njson = false\n".into()),
            init_tracing: true,
            ..Default::default()
        },
        Arc::new(StaticPool::new(pool())),
    )
    .unwrap();
    assert_eq!(engine.config().observability.log_level, "debug");
    assert!(!engine.config().observability.json);
    assert!(!engine.select(&context(), None).is_empty());
}
