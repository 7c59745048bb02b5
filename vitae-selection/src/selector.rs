//! CandidateSelector: scores a pool of achievement records against a context.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use vitae_core::config::SelectionConfig;
use vitae_core::models::{
    AchievementCandidate, AchievementRecord, EmbeddingSnapshot, Selection, SelectionContext,
    SelectionWarning,
};
use vitae_core::skill::normalize_skill;
use vitae_core::traits::IEmbeddingProvider;
use vitae_observability::selection_span;
use vitae_observability::tracing_setup::events;
use vitae_priors::PriorsStore;

use crate::diversity::rank_with_diversity;
use crate::signals::{self, TagMatches};
use crate::tokens::significant_tokens;

pub struct CandidateSelector {
    config: SelectionConfig,
    priors: Arc<PriorsStore>,
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
}

/// Context state computed once per selection.
struct Prepared {
    attributes: BTreeSet<String>,
    /// Stored relevance confidence per attribute.
    relevance: BTreeMap<String, f64>,
    context_tokens: BTreeSet<String>,
    context_vector: Option<Vec<f32>>,
    /// False once the embedder has failed in this call.
    embedder_live: bool,
    snapshot: Arc<EmbeddingSnapshot>,
}

impl CandidateSelector {
    pub fn new(config: SelectionConfig, priors: Arc<PriorsStore>) -> Self {
        Self {
            config,
            priors,
            embedder: None,
        }
    }

    /// Enable similarity scoring.
    pub fn with_embedder(mut self, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Score and rank every record in `pool` within the configured timeout.
    pub fn select(
        &self,
        context: &SelectionContext,
        pool: &[AchievementRecord],
        avoid_overrides: &BTreeSet<String>,
    ) -> Selection {
        let deadline = Instant::now() + Duration::from_millis(self.config.timeout_ms);
        self.select_until(context, pool, avoid_overrides, deadline)
    }

    /// Score and rank until `deadline`. On timeout the ranking of the
    /// records scored so far is returned with `timed_out` set.
    ///
    /// Skills flagged `avoid` do not count as matches unless they appear in
    /// `avoid_overrides`.
    pub fn select_until(
        &self,
        context: &SelectionContext,
        pool: &[AchievementRecord],
        avoid_overrides: &BTreeSet<String>,
        deadline: Instant,
    ) -> Selection {
        let _span = selection_span!(self.config.default_top_n, context.required_attributes.len()).entered();
        let mut warnings = Vec::new();
        let prepared = self.prepare(context, avoid_overrides, &mut warnings);
        let mut similarity_live = prepared.embedder_live;

        let mut candidates = Vec::with_capacity(pool.len());
        let mut timed_out = false;
        for record in pool {
            if Instant::now() >= deadline {
                timed_out = true;
                break;
            }
            candidates.push(self.score_record(
                record,
                &prepared,
                &mut similarity_live,
                &mut warnings,
            ));
        }

        if timed_out {
            events::selection_timed_out(candidates.len(), pool.len(), self.config.timeout_ms);
            warnings.push(SelectionWarning::TimedOut {
                scored: candidates.len(),
                total: pool.len(),
            });
        }

        debug!(
            scored = candidates.len(),
            warnings = warnings.len(),
            version = prepared.snapshot.version,
            "selection scored"
        );

        Selection {
            candidates: rank_with_diversity(candidates),
            warnings,
            timed_out,
            embedding_version: prepared.snapshot.version,
        }
    }

    fn prepare(
        &self,
        context: &SelectionContext,
        avoid_overrides: &BTreeSet<String>,
        warnings: &mut Vec<SelectionWarning>,
    ) -> Prepared {
        let snapshot = self.priors.snapshot();

        let mut attributes: BTreeSet<String> = context
            .required_attributes
            .iter()
            .chain(context.keywords.iter())
            .map(|a| normalize_skill(a))
            .filter(|a| !a.is_empty())
            .collect();

        let mut relevance = BTreeMap::new();
        let mut priors_reported = false;
        attributes.retain(|skill| match self.priors.try_get(skill) {
            Ok(priors) if priors.avoid && !avoid_overrides.contains(skill) => {
                warnings.push(SelectionWarning::SkillAvoided {
                    skill: skill.clone(),
                });
                false
            }
            Ok(priors) => {
                relevance.insert(skill.clone(), priors.relevance.confidence);
                true
            }
            Err(e) => {
                if !priors_reported {
                    priors_reported = true;
                    warn!(error = %e, "priors unreadable, selecting unpersonalized");
                    warnings.push(SelectionWarning::PriorsUnavailable {
                        reason: e.to_string(),
                    });
                }
                relevance.insert(skill.clone(), 0.0);
                true
            }
        });

        let mut embedder_live = self.embedder.is_some();
        let context_vector = match &self.embedder {
            None => {
                warnings.push(SelectionWarning::SimilarityUnavailable {
                    reason: "no similarity provider configured".to_string(),
                });
                None
            }
            Some(_) if context.text.trim().is_empty() => None,
            Some(embedder) => match embedder.embed(&context.text) {
                Ok(v) => Some(v),
                Err(e) => {
                    embedder_live = false;
                    warn!(error = %e, "context embedding failed, scoring categorically");
                    warnings.push(SelectionWarning::SimilarityUnavailable {
                        reason: e.to_string(),
                    });
                    None
                }
            },
        };

        Prepared {
            attributes,
            relevance,
            context_tokens: significant_tokens(&context.text, self.config.min_token_len),
            context_vector,
            embedder_live,
            snapshot,
        }
    }

    fn score_record(
        &self,
        record: &AchievementRecord,
        prepared: &Prepared,
        similarity_live: &mut bool,
        warnings: &mut Vec<SelectionWarning>,
    ) -> AchievementCandidate {
        let summary_vectors = if *similarity_live || !prepared.snapshot.is_empty() {
            self.summary_vectors(record, similarity_live, warnings)
        } else {
            Vec::new()
        };

        let tags: BTreeSet<String> = record.tags.iter().map(|t| normalize_skill(t)).collect();
        let matches: TagMatches = signals::match_tags(
            &prepared.attributes,
            &tags,
            &summary_vectors,
            |skill| prepared.snapshot.samples_for(skill),
            &self.config,
        );
        let (tag_overlap, semantic_tag) = signals::tag_signal(&matches, &self.config);

        let requirement_tokens =
            significant_tokens(&record.addressed_requirements.join(" "), self.config.min_token_len);
        let requirement_overlap =
            signals::requirement_signal(&prepared.context_tokens, &requirement_tokens, &self.config);

        let similarity = match (&prepared.context_vector, *similarity_live) {
            (Some(ctx), true) => signals::similarity_signal(ctx, &summary_vectors, &self.config),
            _ => 0.0,
        };

        let mut candidate = AchievementCandidate::new(&record.id, &record.source);
        candidate.tags = record.tags.clone();
        candidate.addressed_requirements = record.addressed_requirements.clone();
        candidate.matched_skills = matches
            .exact
            .iter()
            .chain(matches.semantic.iter())
            .cloned()
            .collect();
        candidate.base_score = tag_overlap + semantic_tag + requirement_overlap + similarity;
        candidate.final_score = candidate.base_score;

        let breakdown = &mut candidate.breakdown;
        breakdown.insert("tag_overlap".to_string(), tag_overlap);
        breakdown.insert("semantic_tag".to_string(), semantic_tag);
        breakdown.insert("requirement_overlap".to_string(), requirement_overlap);
        breakdown.insert("similarity".to_string(), similarity);
        for skill in &candidate.matched_skills {
            let relevance = prepared.relevance.get(skill).copied().unwrap_or(0.0);
            breakdown.insert(format!("prior:{skill}"), relevance);
        }
        candidate
    }

    /// Stored summary embeddings when usable, otherwise embedded on the fly.
    fn summary_vectors(
        &self,
        record: &AchievementRecord,
        similarity_live: &mut bool,
        warnings: &mut Vec<SelectionWarning>,
    ) -> Vec<Vec<f32>> {
        let Some(embedder) = self.embedder.as_ref().filter(|_| *similarity_live) else {
            return record.summary_embeddings.clone().unwrap_or_default();
        };
        let dims = embedder.dimensions();
        if let Some(stored) = &record.summary_embeddings {
            if !stored.is_empty() && stored.iter().all(|v| v.len() == dims) {
                return stored.clone();
            }
        }
        if record.summaries.is_empty() {
            warnings.push(SelectionWarning::MissingEmbedding {
                achievement_id: record.id.clone(),
            });
            return Vec::new();
        }
        match embedder.embed_batch(&record.summaries) {
            Ok(vectors) => vectors,
            Err(e) => {
                warn!(achievement_id = %record.id, error = %e, "summary embedding failed, similarity disabled");
                *similarity_live = false;
                warnings.push(SelectionWarning::SimilarityUnavailable {
                    reason: e.to_string(),
                });
                Vec::new()
            }
        }
    }
}
