use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Candidate selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Candidates returned when the caller does not say.
    pub default_top_n: usize,
    /// Selection deadline in milliseconds.
    pub timeout_ms: u64,
    /// Score per exactly matching tag.
    pub tag_weight: f64,
    /// Upper bound on the tag signal.
    pub tag_cap: f64,
    /// Score per shared significant requirement token.
    pub requirement_token_weight: f64,
    /// Upper bound on the requirement signal.
    pub requirement_cap: f64,
    /// Weight of the cosine similarity signal.
    pub similarity_weight: f64,
    /// Tokens shorter than this are not significant.
    pub min_token_len: usize,
    /// Cosine needed for a skill-sample match to count as a tag match.
    pub semantic_tag_threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_top_n: defaults::DEFAULT_TOP_N,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            tag_weight: defaults::DEFAULT_TAG_WEIGHT,
            tag_cap: defaults::DEFAULT_TAG_CAP,
            requirement_token_weight: defaults::DEFAULT_REQUIREMENT_TOKEN_WEIGHT,
            requirement_cap: defaults::DEFAULT_REQUIREMENT_CAP,
            similarity_weight: defaults::DEFAULT_SIMILARITY_WEIGHT,
            min_token_len: defaults::DEFAULT_MIN_TOKEN_LEN,
            semantic_tag_threshold: defaults::DEFAULT_SEMANTIC_TAG_THRESHOLD,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("selection.tag_weight", self.tag_weight),
            ("selection.tag_cap", self.tag_cap),
            ("selection.requirement_token_weight", self.requirement_token_weight),
            ("selection.requirement_cap", self.requirement_cap),
            ("selection.similarity_weight", self.similarity_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(super::out_of_range(field, value, "must be a non-negative number"));
            }
        }
        if !(0.0..=1.0).contains(&self.semantic_tag_threshold) {
            return Err(super::out_of_range(
                "selection.semantic_tag_threshold",
                self.semantic_tag_threshold,
                "must be within [0, 1]",
            ));
        }
        if self.default_top_n == 0 {
            return Err(super::out_of_range(
                "selection.default_top_n",
                self.default_top_n,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
