//! v001: skills and per-dimension confidence rows.

use rusqlite::Connection;

use vitae_core::errors::VitaeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitaeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skills (
            skill_id    TEXT PRIMARY KEY,
            avoid       INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS skill_dimensions (
            skill_id           TEXT NOT NULL REFERENCES skills(skill_id),
            dimension          TEXT NOT NULL CHECK (dimension IN ('relevance', 'passion', 'identity', 'requirement')),
            value_json         TEXT,
            confidence         REAL NOT NULL DEFAULT 0.0 CHECK (confidence >= 0.0 AND confidence <= 1.0),
            observation_count  INTEGER NOT NULL DEFAULT 0 CHECK (observation_count >= 0),
            updated_at         TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (skill_id, dimension)
        );

        CREATE INDEX IF NOT EXISTS idx_skills_avoid ON skills(avoid);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
