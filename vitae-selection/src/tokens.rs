//! Significant-token extraction for requirement overlap.

use std::collections::BTreeSet;

const STOPWORDS: &[&str] = &[
    "about", "across", "all", "also", "and", "any", "are", "but", "can", "for", "from", "has",
    "have", "into", "its", "not", "our", "out", "over", "per", "such", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "using", "via", "was",
    "were", "what", "when", "where", "which", "while", "who", "will", "with", "within", "you",
    "your", "years", "year", "work", "working", "experience", "strong", "ability", "team",
];

/// Lowercased tokens at least `min_len` characters long, stopwords removed.
pub fn significant_tokens(text: &str, min_len: usize) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() >= min_len && !STOPWORDS.contains(&t.as_str()))
        .collect()
}
