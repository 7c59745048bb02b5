//! Versioned skill-sample embeddings.

use std::collections::BTreeSet;

use rusqlite::{params, Connection};

use vitae_core::errors::VitaeResult;
use vitae_core::models::SkillSample;

use crate::{corrupt_row, to_storage_err};

/// Replace the stored sample set with `samples` under the next free
/// version and return it.
///
/// The version row is the first statement of the transaction, so the read
/// of the current maximum and the insert share one write lock.
pub fn replace_skill_samples(conn: &Connection, samples: &[SkillSample]) -> VitaeResult<u64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("replace_skill_samples begin: {e}")))?;

    let skill_count = samples
        .iter()
        .map(|s| s.skill.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let version: i64 = tx
        .query_row(
            "INSERT INTO embedding_versions (version, skill_count, sample_count)
             SELECT COALESCE(MAX(version), 0) + 1, ?1, ?2 FROM embedding_versions
             RETURNING version",
            params![skill_count as i64, samples.len() as i64],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute("DELETE FROM skill_samples WHERE version < ?1", params![version])
        .map_err(|e| to_storage_err(e.to_string()))?;

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO skill_samples (version, skill_id, text, dimensions, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for sample in samples {
            stmt.execute(params![
                version,
                sample.skill,
                sample.text,
                sample.embedding.len() as i64,
                f32_vec_to_bytes(&sample.embedding),
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("replace_skill_samples commit: {e}")))?;
    Ok(version as u64)
}

/// Latest version and its samples, `(0, [])` when nothing was ever built.
pub fn load_skill_samples(conn: &Connection) -> VitaeResult<(u64, Vec<SkillSample>)> {
    let version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM embedding_versions",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if version == 0 {
        return Ok((0, Vec::new()));
    }

    let mut stmt = conn
        .prepare(
            "SELECT skill_id, text, dimensions, embedding FROM skill_samples
             WHERE version = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![version], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut samples = Vec::new();
    for row in rows {
        let (skill, text, dims, bytes) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let embedding = bytes_to_f32_vec(&bytes);
        if embedding.len() as i64 != dims {
            return Err(corrupt_row(
                "skill_samples",
                format!("{skill}: expected {dims} dims, found {}", embedding.len()),
            ));
        }
        samples.push(SkillSample {
            skill,
            text,
            embedding,
            version: version as u64,
        });
    }
    Ok((version as u64, samples))
}

fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_bytes_round_trip() {
        let v = vec![0.25f32, -1.5, 3.0];
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&v)), v);
    }
}
