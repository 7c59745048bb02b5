//! Configuration: one `#[serde(default)]` section per subsystem.
//!
//! Loading validates every section, so a bad multiplier or strategy fails
//! here and never mid-request.

pub mod boost_config;
pub mod defaults;
pub mod embedding_config;
pub mod learning_config;
pub mod observability_config;
pub mod selection_config;
pub mod storage_config;

use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use boost_config::{BoostConfig, ConflictStrategy};
pub use embedding_config::EmbeddingConfig;
pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;
pub use selection_config::SelectionConfig;
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, VitaeResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitaeConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub selection: SelectionConfig,
    pub boost: BoostConfig,
    pub learning: LearningConfig,
    pub observability: ObservabilityConfig,
}

impl VitaeConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml(source: &str) -> VitaeResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> VitaeResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.embedding.validate()?;
        self.selection.validate()?;
        self.learning.validate()?;
        Ok(())
    }
}

pub(crate) fn out_of_range(field: &str, value: impl Display, reason: &str) -> ConfigError {
    ConfigError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
