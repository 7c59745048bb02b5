use serde::{Deserialize, Serialize};

/// A pre-authored achievement record, owned by the upstream ingestion process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    /// Company / role the achievement belongs to. Drives the diversity rule.
    #[serde(default)]
    pub source: String,
    /// Categorical skill tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// One or more text summaries.
    #[serde(default)]
    pub summaries: Vec<String>,
    /// Requirements / pain points this achievement addresses.
    #[serde(default)]
    pub addressed_requirements: Vec<String>,
    /// Pre-computed summary vectors, parallel to `summaries` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_embeddings: Option<Vec<Vec<f32>>>,
}

impl AchievementRecord {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            tags: Vec::new(),
            summaries: Vec::new(),
            addressed_requirements: Vec::new(),
            summary_embeddings: None,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summaries.push(summary.into());
        self
    }

    pub fn with_requirements(mut self, requirements: &[&str]) -> Self {
        self.addressed_requirements = requirements.iter().map(|r| r.to_string()).collect();
        self
    }
}

/// The requirement context a selection is scored against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Free-text requirement (e.g. a job description excerpt).
    #[serde(default)]
    pub text: String,
    /// Required skill / attribute identifiers.
    #[serde(default)]
    pub required_attributes: Vec<String>,
    /// Additional keyword strings.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SelectionContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: &[&str]) -> Self {
        self.required_attributes = attributes.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }
}
