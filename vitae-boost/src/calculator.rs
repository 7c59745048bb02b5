//! Aggregation and candidate re-scoring.

use std::cmp::Ordering;

use tracing::debug;
use vitae_core::annotation::Annotation;
use vitae_core::config::{BoostConfig, ConflictStrategy};
use vitae_core::constants::NEUTRAL_BOOST;
use vitae_core::models::AchievementCandidate;
use vitae_selection::rank_with_diversity;

use crate::multipliers::compute_boost;
use crate::target::{applies_to_candidate, BoostTarget};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoostCalculator {
    strategy: ConflictStrategy,
}

impl BoostCalculator {
    pub fn new(config: &BoostConfig) -> Self {
        Self::with_strategy(config.conflict_strategy)
    }

    pub fn with_strategy(strategy: ConflictStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ConflictStrategy {
        self.strategy
    }

    pub fn compute_boost(&self, annotation: &Annotation) -> f64 {
        compute_boost(annotation)
    }

    /// Aggregate boost of the active annotations bearing on `target`.
    /// Neutral when none applies.
    pub fn aggregate(&self, annotations: &[Annotation], target: &BoostTarget) -> f64 {
        let applicable: Vec<&Annotation> = annotations
            .iter()
            .filter(|a| a.is_active && target.matches(a))
            .collect();
        self.resolve(applicable)
    }

    /// Multiply each candidate by the resolved boost of the annotations
    /// applying to it, record the contributions, and re-rank.
    pub fn apply_annotation_boost(
        &self,
        candidates: Vec<AchievementCandidate>,
        annotations: &[Annotation],
    ) -> Vec<AchievementCandidate> {
        let active: Vec<&Annotation> = annotations.iter().filter(|a| a.is_active).collect();

        let boosted = candidates
            .into_iter()
            .map(|mut candidate| {
                let applicable: Vec<&Annotation> = active
                    .iter()
                    .copied()
                    .filter(|a| applies_to_candidate(a, &candidate))
                    .collect();
                for annotation in &applicable {
                    candidate
                        .breakdown
                        .insert(format!("annotation:{}", annotation.id), compute_boost(annotation));
                }
                let boost = self.resolve(applicable);
                candidate.breakdown.insert("boost".to_string(), boost);
                candidate.apply_boost(boost);
                candidate
            })
            .collect();

        debug!(
            strategy = ?self.strategy,
            active = active.len(),
            "annotation boosts applied"
        );
        rank_with_diversity(boosted)
    }

    fn resolve(&self, mut applicable: Vec<&Annotation>) -> f64 {
        if applicable.is_empty() {
            return NEUTRAL_BOOST;
        }
        // Fixed order keeps float sums identical across input orderings.
        applicable.sort_by(|a, b| a.id.cmp(&b.id));
        match self.strategy {
            ConflictStrategy::MaxBoost => applicable
                .iter()
                .map(|a| compute_boost(a))
                .fold(f64::NEG_INFINITY, f64::max),
            ConflictStrategy::AvgBoost => {
                let sum: f64 = applicable.iter().map(|a| compute_boost(a)).sum();
                sum / applicable.len() as f64
            }
            ConflictStrategy::LastWrite => applicable
                .iter()
                .max_by(|a, b| last_write_order(a, b))
                .map_or(NEUTRAL_BOOST, |a| compute_boost(a)),
        }
    }
}

fn last_write_order(a: &Annotation, b: &Annotation) -> Ordering {
    a.updated_at
        .cmp(&b.updated_at)
        .then_with(|| a.id.cmp(&b.id))
}
