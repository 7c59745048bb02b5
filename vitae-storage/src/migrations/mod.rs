//! Versioned schema migrations, tracked in `schema_version`.

mod v001_priors_tables;
mod v002_skill_samples;
mod v003_annotation_tables;
mod v004_effectiveness_log;

use rusqlite::{params, Connection};
use tracing::info;

use vitae_core::errors::{StorageError, VitaeResult};

type Migration = fn(&Connection) -> VitaeResult<()>;

const MIGRATIONS: &[(u32, &str, Migration)] = &[
    (1, "priors_tables", v001_priors_tables::migrate),
    (2, "skill_samples", v002_skill_samples::migrate),
    (3, "annotation_tables", v003_annotation_tables::migrate),
    (4, "effectiveness_log", v004_effectiveness_log::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 4;

/// Apply every migration newer than the stored schema version.
pub fn run_migrations(conn: &Connection) -> VitaeResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| failed(0, e))?;

    let current = current_version(conn)?;
    for (version, name, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        let tx = conn.unchecked_transaction().map_err(|e| failed(*version, e))?;
        migrate(&tx).map_err(|e| failed(*version, e))?;
        tx.execute(
            "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(|e| failed(*version, e))?;
        tx.commit().map_err(|e| failed(*version, e))?;
        info!(version = *version, name = *name, "migration applied");
    }
    current_version(conn)
}

/// Highest applied version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> VitaeResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| failed(0, e))
}

fn failed(version: u32, reason: impl ToString) -> vitae_core::errors::VitaeError {
    StorageError::MigrationFailed {
        version,
        reason: reason.to_string(),
    }
    .into()
}
