//! The three base-score signals. Pure functions over prepared inputs.

use std::collections::BTreeSet;

use vitae_core::config::SelectionConfig;
use vitae_embeddings::max_similarity;

/// Exactly and semantically matched attributes for one candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMatches {
    pub exact: Vec<String>,
    pub semantic: Vec<String>,
}

/// Tag signal split into its exact and semantic parts, capped together.
pub fn tag_signal(matches: &TagMatches, config: &SelectionConfig) -> (f64, f64) {
    let exact = (config.tag_weight * matches.exact.len() as f64).min(config.tag_cap);
    let total = (config.tag_weight * (matches.exact.len() + matches.semantic.len()) as f64)
        .min(config.tag_cap);
    (exact, total - exact)
}

/// Attributes matched exactly by `tags`, then semantically via skill samples.
///
/// `samples_for` yields the sample embeddings of an attribute; a semantic
/// match needs one sample within `semantic_tag_threshold` of any summary.
pub fn match_tags<'a>(
    attributes: &BTreeSet<String>,
    tags: &BTreeSet<String>,
    summary_vectors: &[Vec<f32>],
    samples_for: impl Fn(&str) -> &'a [Vec<f32>],
    config: &SelectionConfig,
) -> TagMatches {
    let mut matches = TagMatches::default();
    for attribute in attributes {
        if tags.contains(attribute) {
            matches.exact.push(attribute.clone());
            continue;
        }
        if summary_vectors.is_empty() {
            continue;
        }
        let best = samples_for(attribute)
            .iter()
            .map(|sample| max_similarity(sample, summary_vectors))
            .fold(0.0, f64::max);
        if best >= config.semantic_tag_threshold {
            matches.semantic.push(attribute.clone());
        }
    }
    matches
}

/// `requirement_token_weight` per shared token, capped.
pub fn requirement_signal(
    context_tokens: &BTreeSet<String>,
    requirement_tokens: &BTreeSet<String>,
    config: &SelectionConfig,
) -> f64 {
    let shared = context_tokens.intersection(requirement_tokens).count();
    (config.requirement_token_weight * shared as f64).min(config.requirement_cap)
}

/// Weighted best cosine between the context vector and any summary vector.
pub fn similarity_signal(
    context_vector: &[f32],
    summary_vectors: &[Vec<f32>],
    config: &SelectionConfig,
) -> f64 {
    config.similarity_weight * max_similarity(context_vector, summary_vectors)
}
