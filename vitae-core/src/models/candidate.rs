use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_BOOST;

/// A scored, rankable reference to an achievement record.
///
/// Built fresh per selection call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementCandidate {
    pub achievement_id: String,
    /// Company / role of the underlying record.
    pub source: String,
    /// Normalized tags of the record, kept for annotation matching.
    pub tags: Vec<String>,
    /// Addressed requirements of the record, kept for annotation matching.
    pub addressed_requirements: Vec<String>,
    /// Context skills this candidate matched (exactly or semantically).
    pub matched_skills: Vec<String>,
    /// Weighted sum of tag, requirement, and similarity signals.
    pub base_score: f64,
    pub boost_factor: f64,
    /// `base_score * boost_factor`.
    pub final_score: f64,
    /// What contributed to the score and by how much.
    pub breakdown: BTreeMap<String, f64>,
}

impl AchievementCandidate {
    pub fn new(achievement_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            achievement_id: achievement_id.into(),
            source: source.into(),
            tags: Vec::new(),
            addressed_requirements: Vec::new(),
            matched_skills: Vec::new(),
            base_score: 0.0,
            boost_factor: NEUTRAL_BOOST,
            final_score: 0.0,
            breakdown: BTreeMap::new(),
        }
    }

    /// Set the boost factor and recompute the final score.
    pub fn apply_boost(&mut self, boost_factor: f64) {
        self.boost_factor = boost_factor;
        self.final_score = self.base_score * boost_factor;
    }
}
