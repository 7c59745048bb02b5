use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One sample text and its embedding for a skill, tagged with the rebuild version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSample {
    pub skill: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub version: u64,
}

/// An immutable view of all skill sample embeddings at one version.
///
/// Selections clone the `Arc` holding this at their start and keep using it
/// even if a rebuild publishes a newer version meanwhile.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingSnapshot {
    pub version: u64,
    samples: HashMap<String, Vec<Vec<f32>>>,
}

impl EmbeddingSnapshot {
    pub fn new(version: u64, samples: &[SkillSample]) -> Self {
        let mut map: HashMap<String, Vec<Vec<f32>>> = HashMap::new();
        for sample in samples {
            map.entry(sample.skill.clone())
                .or_default()
                .push(sample.embedding.clone());
        }
        Self {
            version,
            samples: map,
        }
    }

    /// Sample vectors for a skill; empty when the skill was never sampled.
    pub fn samples_for(&self, skill: &str) -> &[Vec<f32>] {
        self.samples.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn skill_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
