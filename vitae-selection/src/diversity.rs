//! Diversity-aware ordering.
//!
//! Candidates are taken best-first by `final_score`. Among candidates tied
//! on score, one whose source is not yet represented goes first. Remaining
//! ties break on achievement id so the order is total.

use std::cmp::Ordering;
use std::collections::HashSet;

use vitae_core::constants::SCORE_EPSILON;
use vitae_core::models::AchievementCandidate;

pub fn rank_with_diversity(mut candidates: Vec<AchievementCandidate>) -> Vec<AchievementCandidate> {
    candidates.sort_by(by_score_then_id);

    let mut ranked = Vec::with_capacity(candidates.len());
    let mut seen_sources: HashSet<String> = HashSet::new();

    while !candidates.is_empty() {
        let top = candidates[0].final_score;
        let pick = candidates
            .iter()
            .take_while(|c| (top - c.final_score).abs() <= SCORE_EPSILON)
            .position(|c| !seen_sources.contains(&c.source))
            .unwrap_or(0);
        let chosen = candidates.remove(pick);
        seen_sources.insert(chosen.source.clone());
        ranked.push(chosen);
    }
    ranked
}

fn by_score_then_id(a: &AchievementCandidate, b: &AchievementCandidate) -> Ordering {
    b.final_score
        .partial_cmp(&a.final_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.achievement_id.cmp(&b.achievement_id))
}
