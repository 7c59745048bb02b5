use serde::{Deserialize, Serialize};

/// How competing annotations on one target are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// Highest boost wins.
    #[default]
    MaxBoost,
    /// Arithmetic mean of all applicable boosts.
    AvgBoost,
    /// Most recently updated annotation wins.
    LastWrite,
}

/// Boost calculator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    pub conflict_strategy: ConflictStrategy,
}
