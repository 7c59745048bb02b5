use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(super::out_of_range("storage.db_path", "\"\"", "must not be empty"));
        }
        if self.read_pool_size == 0 {
            return Err(super::out_of_range(
                "storage.read_pool_size",
                self.read_pool_size,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
