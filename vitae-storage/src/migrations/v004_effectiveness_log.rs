//! v004: append-only effectiveness log.

use rusqlite::Connection;

use vitae_core::errors::VitaeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitaeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS effectiveness_log (
            seq                 INTEGER PRIMARY KEY AUTOINCREMENT,
            id                  TEXT NOT NULL UNIQUE,
            subject_type        TEXT NOT NULL,
            subject_id          TEXT NOT NULL,
            outcome             TEXT NOT NULL,
            annotation_density  REAL,
            learning_mode       TEXT,
            recorded_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_effectiveness_subject
            ON effectiveness_log(subject_type, subject_id);

        CREATE TRIGGER IF NOT EXISTS effectiveness_log_no_update
        BEFORE UPDATE ON effectiveness_log
        BEGIN
            SELECT RAISE(ABORT, 'effectiveness log is append-only');
        END;

        CREATE TRIGGER IF NOT EXISTS effectiveness_log_no_delete
        BEFORE DELETE ON effectiveness_log
        BEGIN
            SELECT RAISE(ABORT, 'effectiveness log is append-only');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
