//! v002: embedding versions and per-skill sample embeddings.

use rusqlite::Connection;

use vitae_core::errors::VitaeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitaeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS embedding_versions (
            version       INTEGER PRIMARY KEY,
            skill_count   INTEGER NOT NULL,
            sample_count  INTEGER NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS skill_samples (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            version     INTEGER NOT NULL REFERENCES embedding_versions(version),
            skill_id    TEXT NOT NULL,
            text        TEXT NOT NULL,
            dimensions  INTEGER NOT NULL,
            embedding   BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_skill_samples_version ON skill_samples(version);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
