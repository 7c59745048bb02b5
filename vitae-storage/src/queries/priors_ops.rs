//! Field-level reads and writes for skill priors.

use rusqlite::{params, Connection, OptionalExtension};

use vitae_core::errors::VitaeResult;
use vitae_core::skill::{Dimension, SkillConfidence, SkillPriors, SkillValue};

use crate::{corrupt_row, to_storage_err};

/// Load a skill's priors. `None` when the skill has no row.
pub fn get_priors(conn: &Connection, skill: &str) -> VitaeResult<Option<SkillPriors>> {
    let avoid: Option<bool> = conn
        .query_row(
            "SELECT avoid FROM skills WHERE skill_id = ?1",
            params![skill],
            |row| row.get::<_, i64>(0).map(|v| v != 0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some(avoid) = avoid else {
        return Ok(None);
    };

    let mut priors = SkillPriors::unobserved(skill);
    priors.avoid = avoid;

    let mut stmt = conn
        .prepare(
            "SELECT dimension, value_json, confidence, observation_count
             FROM skill_dimensions WHERE skill_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![skill], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for row in rows {
        let (dimension, value_json, confidence, observations) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let dimension: Dimension = dimension
            .parse()
            .map_err(|_| corrupt_row("skill_dimensions", format!("unknown dimension {dimension}")))?;
        let value = match value_json {
            Some(json) => Some(
                serde_json::from_str::<SkillValue>(&json)
                    .map_err(|e| corrupt_row("skill_dimensions", e))?,
            ),
            None => None,
        };
        *priors.dimension_mut(dimension) =
            SkillConfidence::new(value, confidence, observations.max(0) as u64);
    }

    Ok(Some(priors))
}

fn ensure_skill(conn: &Connection, skill: &str) -> VitaeResult<()> {
    conn.execute(
        "INSERT INTO skills (skill_id) VALUES (?1) ON CONFLICT(skill_id) DO NOTHING",
        params![skill],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn value_json(confidence: &SkillConfidence) -> VitaeResult<Option<String>> {
    confidence
        .value
        .as_ref()
        .map(|v| serde_json::to_string(v).map_err(|e| to_storage_err(e.to_string())))
        .transpose()
}

/// Unconditionally write one dimension, leaving the others untouched.
pub fn upsert_dimension(
    conn: &Connection,
    skill: &str,
    dimension: Dimension,
    confidence: &SkillConfidence,
) -> VitaeResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("upsert_dimension begin: {e}")))?;
    ensure_skill(&tx, skill)?;
    tx.execute(
        "INSERT INTO skill_dimensions (skill_id, dimension, value_json, confidence, observation_count)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(skill_id, dimension) DO UPDATE SET
            value_json = excluded.value_json,
            confidence = excluded.confidence,
            observation_count = excluded.observation_count,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            skill,
            dimension.as_str(),
            value_json(confidence)?,
            confidence.confidence,
            confidence.observation_count as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    touch_skill(&tx, skill)?;
    tx.commit()
        .map_err(|e| to_storage_err(format!("upsert_dimension commit: {e}")))?;
    Ok(())
}

/// Write one dimension only if its stored observation count still equals
/// `expected_observations`. Returns whether the write happened.
pub fn compare_and_upsert(
    conn: &Connection,
    skill: &str,
    dimension: Dimension,
    expected_observations: u64,
    confidence: &SkillConfidence,
) -> VitaeResult<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("compare_and_upsert begin: {e}")))?;
    ensure_skill(&tx, skill)?;

    let value = value_json(confidence)?;
    let result = if expected_observations == 0 {
        tx.execute(
            "INSERT INTO skill_dimensions (skill_id, dimension, value_json, confidence, observation_count)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(skill_id, dimension) DO UPDATE SET
                value_json = excluded.value_json,
                confidence = excluded.confidence,
                observation_count = excluded.observation_count,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE skill_dimensions.observation_count = 0",
            params![
                skill,
                dimension.as_str(),
                value,
                confidence.confidence,
                confidence.observation_count as i64,
            ],
        )
    } else {
        tx.execute(
            "UPDATE skill_dimensions SET
                value_json = ?3,
                confidence = ?4,
                observation_count = ?5,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE skill_id = ?1 AND dimension = ?2 AND observation_count = ?6",
            params![
                skill,
                dimension.as_str(),
                value,
                confidence.confidence,
                confidence.observation_count as i64,
                expected_observations as i64,
            ],
        )
    };
    let changed = result.map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 1 {
        touch_skill(&tx, skill)?;
    }
    tx.commit()
        .map_err(|e| to_storage_err(format!("compare_and_upsert commit: {e}")))?;
    Ok(changed == 1)
}

/// Set only the avoid column.
pub fn set_avoid(conn: &Connection, skill: &str, avoid: bool) -> VitaeResult<()> {
    conn.execute(
        "INSERT INTO skills (skill_id, avoid) VALUES (?1, ?2)
         ON CONFLICT(skill_id) DO UPDATE SET
            avoid = excluded.avoid,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![skill, avoid as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn list_skills(conn: &Connection) -> VitaeResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT skill_id FROM skills ORDER BY skill_id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn touch_skill(conn: &Connection, skill: &str) -> VitaeResult<()> {
    conn.execute(
        "UPDATE skills SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE skill_id = ?1",
        params![skill],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
