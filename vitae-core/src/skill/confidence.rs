use serde::{Deserialize, Serialize};

/// A stored belief value: either categorical ("relevant", "core") or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillValue {
    Flag(bool),
    Level(String),
}

impl From<bool> for SkillValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for SkillValue {
    fn from(value: &str) -> Self {
        Self::Level(value.to_string())
    }
}

impl From<String> for SkillValue {
    fn from(value: String) -> Self {
        Self::Level(value)
    }
}

/// Confidence record for one (skill, dimension) pair.
///
/// Invariant: `confidence == 0.0` whenever `observation_count == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfidence {
    pub value: Option<SkillValue>,
    pub confidence: f64,
    pub observation_count: u64,
}

impl SkillConfidence {
    /// The never-observed record.
    pub fn unobserved() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            observation_count: 0,
        }
    }

    /// Build a record, enforcing the zero-observation invariant.
    pub fn new(value: Option<SkillValue>, confidence: f64, observation_count: u64) -> Self {
        let confidence = if observation_count == 0 {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            value,
            confidence,
            observation_count,
        }
    }

    pub fn is_observed(&self) -> bool {
        self.observation_count > 0
    }

    /// Whether the stored value has enough observations behind it to be trusted.
    pub fn is_stable(&self, min_observations: u64) -> bool {
        self.observation_count >= min_observations
    }

    /// The stored value, only once it has crossed the stability threshold.
    pub fn authoritative_value(&self, min_observations: u64) -> Option<&SkillValue> {
        if self.is_stable(min_observations) {
            self.value.as_ref()
        } else {
            None
        }
    }
}

impl Default for SkillConfidence {
    fn default() -> Self {
        Self::unobserved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_observations_forces_zero_confidence() {
        let c = SkillConfidence::new(Some("relevant".into()), 0.9, 0);
        assert_eq!(c.confidence, 0.0);
        assert!(!c.is_observed());
    }

    #[test]
    fn value_is_authoritative_only_when_stable() {
        let c = SkillConfidence::new(Some("relevant".into()), 0.7, 2);
        assert!(c.authoritative_value(3).is_none());
        let c = SkillConfidence::new(Some("relevant".into()), 0.7, 3);
        assert_eq!(c.authoritative_value(3), Some(&SkillValue::Level("relevant".into())));
    }

    #[test]
    fn untagged_value_serde() {
        let flag: SkillValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, SkillValue::Flag(true));
        let level: SkillValue = serde_json::from_str("\"core\"").unwrap();
        assert_eq!(level, SkillValue::Level("core".into()));
    }
}
