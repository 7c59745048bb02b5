//! Insert-only effectiveness log.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;

use vitae_core::errors::VitaeResult;
use vitae_core::models::{EffectivenessRecord, EffectivenessSubject};

use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "effectiveness_log";

pub fn append_outcome(conn: &Connection, record: &EffectivenessRecord) -> VitaeResult<()> {
    let (subject_type, subject_id) = subject_columns(&record.subject);
    conn.execute(
        "INSERT INTO effectiveness_log
            (id, subject_type, subject_id, outcome, annotation_density, learning_mode, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id,
            subject_type,
            subject_id,
            record.outcome.as_str(),
            record.annotation_density,
            record.learning_mode.map(|m| m.as_str()),
            record.recorded_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn all_outcomes(conn: &Connection) -> VitaeResult<Vec<EffectivenessRecord>> {
    query(conn, "ORDER BY seq", params![])
}

pub fn outcomes_for(
    conn: &Connection,
    subject: &EffectivenessSubject,
) -> VitaeResult<Vec<EffectivenessRecord>> {
    let (subject_type, subject_id) = subject_columns(subject);
    query(
        conn,
        "WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY seq",
        params![subject_type, subject_id],
    )
}

fn subject_columns(subject: &EffectivenessSubject) -> (&'static str, &str) {
    match subject {
        EffectivenessSubject::Skill(id) => ("skill", id.as_str()),
        EffectivenessSubject::Annotation(id) => ("annotation", id.as_str()),
    }
}

type RawRow = (
    String,
    String,
    String,
    String,
    Option<f64>,
    Option<String>,
    String,
);

fn query(
    conn: &Connection,
    clause: &str,
    params: &[&dyn rusqlite::ToSql],
) -> VitaeResult<Vec<EffectivenessRecord>> {
    let sql = format!(
        "SELECT id, subject_type, subject_id, outcome, annotation_density, learning_mode, recorded_at
         FROM effectiveness_log {clause}"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, raw_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(to_record(raw)?);
    }
    Ok(out)
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn to_record(raw: RawRow) -> VitaeResult<EffectivenessRecord> {
    let (id, subject_type, subject_id, outcome, density, mode, recorded_at) = raw;
    let subject = match subject_type.as_str() {
        "skill" => EffectivenessSubject::Skill(subject_id),
        "annotation" => EffectivenessSubject::Annotation(subject_id),
        other => return Err(corrupt_row(TABLE, format!("unknown subject type {other}"))),
    };
    let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
        .map_err(|e| corrupt_row(TABLE, e))?
        .with_timezone(&Utc);
    Ok(EffectivenessRecord {
        id,
        subject,
        outcome: parse_enum(&outcome)?,
        annotation_density: density,
        learning_mode: mode.as_deref().map(parse_enum).transpose()?,
        recorded_at,
    })
}

/// Parse a serde unit variant from its stored name.
fn parse_enum<T: DeserializeOwned>(name: &str) -> VitaeResult<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|e| corrupt_row(TABLE, e))
}
