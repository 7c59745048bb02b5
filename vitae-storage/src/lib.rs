//! # vitae-storage
//!
//! SQLite persistence: one serialized writer, a round-robin read pool,
//! versioned migrations, and one row per `(skill, dimension)` so every
//! priors write is a field-level merge.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use vitae_core::errors::{StorageError, VitaeError};

/// Wrap a SQLite failure message in the workspace error type.
pub fn to_storage_err(message: String) -> VitaeError {
    VitaeError::StorageError(StorageError::SqliteError { message })
}

pub(crate) fn corrupt_row(table: &str, details: impl ToString) -> VitaeError {
    VitaeError::StorageError(StorageError::CorruptRow {
        table: table.to_string(),
        details: details.to_string(),
    })
}
