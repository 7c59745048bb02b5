//! v003: annotations. No delete path exists; rows are deactivated in place.

use rusqlite::Connection;

use vitae_core::errors::VitaeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VitaeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS annotations (
            id          TEXT PRIMARY KEY,
            status      TEXT NOT NULL,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            payload     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_annotations_active ON annotations(is_active);

        CREATE TRIGGER IF NOT EXISTS annotations_never_deleted
        BEFORE DELETE ON annotations
        BEGIN
            SELECT RAISE(ABORT, 'annotations are deactivated, never deleted');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
