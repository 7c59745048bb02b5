//! Annotation rows. Full payload is JSON; status and activity are
//! mirrored into columns for filtering.

use rusqlite::{params, Connection, OptionalExtension};

use vitae_core::annotation::Annotation;
use vitae_core::errors::{VitaeError, VitaeResult};

use crate::{corrupt_row, to_storage_err};

pub fn insert_annotation(conn: &Connection, annotation: &Annotation) -> VitaeResult<()> {
    let payload = serde_json::to_string(annotation)?;
    conn.execute(
        "INSERT INTO annotations (id, status, is_active, created_at, updated_at, payload)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            annotation.id,
            annotation.status.to_string(),
            annotation.is_active as i64,
            annotation.created_at.to_rfc3339(),
            annotation.updated_at.to_rfc3339(),
            payload,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_annotation(conn: &Connection, id: &str) -> VitaeResult<Option<Annotation>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM annotations WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    payload.map(|p| parse(&p)).transpose()
}

/// Overwrite an existing annotation. Unknown ids are an error.
pub fn update_annotation(conn: &Connection, annotation: &Annotation) -> VitaeResult<()> {
    let payload = serde_json::to_string(annotation)?;
    let changed = conn
        .execute(
            "UPDATE annotations SET status = ?2, is_active = ?3, updated_at = ?4, payload = ?5
             WHERE id = ?1",
            params![
                annotation.id,
                annotation.status.to_string(),
                annotation.is_active as i64,
                annotation.updated_at.to_rfc3339(),
                payload,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(VitaeError::AnnotationNotFound {
            id: annotation.id.clone(),
        });
    }
    Ok(())
}

pub fn list_annotations(conn: &Connection, active_only: bool) -> VitaeResult<Vec<Annotation>> {
    let sql = if active_only {
        "SELECT payload FROM annotations WHERE is_active = 1 ORDER BY id"
    } else {
        "SELECT payload FROM annotations ORDER BY id"
    };
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        let payload = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(parse(&payload)?);
    }
    Ok(out)
}

fn parse(payload: &str) -> VitaeResult<Annotation> {
    serde_json::from_str(payload).map_err(|e| corrupt_row("annotations", e))
}
