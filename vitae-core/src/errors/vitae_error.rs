use super::{ConfigError, EmbeddingError, StorageError};

/// Umbrella error for every vitae subsystem.
#[derive(Debug, thiserror::Error)]
pub enum VitaeError {
    #[error("annotation not found: {id}")]
    AnnotationNotFound { id: String },

    #[error("annotation {id} cannot {action} while {from}")]
    InvalidTransition {
        id: String,
        from: String,
        action: String,
    },

    #[error("priority must be between 1 and 5, got {value}")]
    InvalidPriority { value: u8 },

    #[error("concurrent updates to skill {skill} did not settle after {attempts} attempts")]
    ConcurrencyConflict { skill: String, attempts: usize },

    #[error("degraded mode: {component} using {fallback}")]
    DegradedMode { component: String, fallback: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type VitaeResult<T> = Result<T, VitaeError>;
