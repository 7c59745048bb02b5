//! StorageEngine: owns the connection pool and implements the priors,
//! annotation, and effectiveness storage traits.

use std::path::Path;

use tracing::info;

use vitae_core::annotation::Annotation;
use vitae_core::config::StorageConfig;
use vitae_core::errors::VitaeResult;
use vitae_core::models::{EffectivenessRecord, EffectivenessSubject, SkillSample};
use vitae_core::skill::{normalize_skill, Dimension, SkillConfidence, SkillPriors};
use vitae_core::traits::{IAnnotationStorage, IEffectivenessStorage, IPriorsStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{annotation_ops, effectiveness_ops, priors_ops, sample_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> VitaeResult<Self> {
        Self::open_with_config(&StorageConfig {
            db_path: path.display().to_string(),
            ..Default::default()
        })
    }

    /// Open a file-backed engine from a storage config section.
    pub fn open_with_config(config: &StorageConfig) -> VitaeResult<Self> {
        let path = Path::new(&config.db_path);
        // The writer must create and migrate the file before read-only handles open.
        let writer = crate::pool::WriteConnection::open(path, config.busy_timeout_ms)?;
        let version = writer.with_conn(migrations::run_migrations)?;
        let readers =
            crate::pool::ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        info!(
            path = %config.db_path,
            schema_version = version,
            readers = readers.size(),
            "storage opened"
        );
        Ok(Self {
            pool: ConnectionPool {
                writer,
                readers: Some(readers),
                db_path: Some(path.to_path_buf()),
            },
        })
    }

    /// Open an in-memory engine. All reads route through the writer.
    pub fn open_in_memory() -> VitaeResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.writer.with_conn(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> VitaeResult<u32> {
        self.with_reader(migrations::current_version)
    }

    fn with_reader<F, T>(&self, f: F) -> VitaeResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VitaeResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IPriorsStorage for StorageEngine {
    fn get_priors(&self, skill: &str) -> VitaeResult<Option<SkillPriors>> {
        let skill = normalize_skill(skill);
        self.with_reader(|conn| priors_ops::get_priors(conn, &skill))
    }

    fn upsert_dimension(
        &self,
        skill: &str,
        dimension: Dimension,
        confidence: &SkillConfidence,
    ) -> VitaeResult<()> {
        let skill = normalize_skill(skill);
        self.pool
            .writer
            .with_conn(|conn| priors_ops::upsert_dimension(conn, &skill, dimension, confidence))
    }

    fn compare_and_upsert(
        &self,
        skill: &str,
        dimension: Dimension,
        expected_observations: u64,
        confidence: &SkillConfidence,
    ) -> VitaeResult<bool> {
        let skill = normalize_skill(skill);
        self.pool.writer.with_conn(|conn| {
            priors_ops::compare_and_upsert(conn, &skill, dimension, expected_observations, confidence)
        })
    }

    fn set_avoid(&self, skill: &str, avoid: bool) -> VitaeResult<()> {
        let skill = normalize_skill(skill);
        self.pool
            .writer
            .with_conn(|conn| priors_ops::set_avoid(conn, &skill, avoid))
    }

    fn list_skills(&self) -> VitaeResult<Vec<String>> {
        self.with_reader(priors_ops::list_skills)
    }

    fn replace_skill_samples(&self, samples: &[SkillSample]) -> VitaeResult<u64> {
        self.pool
            .writer
            .with_conn(|conn| sample_ops::replace_skill_samples(conn, samples))
    }

    fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)> {
        self.with_reader(sample_ops::load_skill_samples)
    }
}

impl IAnnotationStorage for StorageEngine {
    fn create_annotation(&self, annotation: &Annotation) -> VitaeResult<()> {
        self.pool
            .writer
            .with_conn(|conn| annotation_ops::insert_annotation(conn, annotation))
    }

    fn get_annotation(&self, id: &str) -> VitaeResult<Option<Annotation>> {
        self.with_reader(|conn| annotation_ops::get_annotation(conn, id))
    }

    fn update_annotation(&self, annotation: &Annotation) -> VitaeResult<()> {
        self.pool
            .writer
            .with_conn(|conn| annotation_ops::update_annotation(conn, annotation))
    }

    fn list_active_annotations(&self) -> VitaeResult<Vec<Annotation>> {
        self.with_reader(|conn| annotation_ops::list_annotations(conn, true))
    }

    fn list_all_annotations(&self) -> VitaeResult<Vec<Annotation>> {
        self.with_reader(|conn| annotation_ops::list_annotations(conn, false))
    }
}

impl IEffectivenessStorage for StorageEngine {
    fn append_outcome(&self, record: &EffectivenessRecord) -> VitaeResult<()> {
        self.pool
            .writer
            .with_conn(|conn| effectiveness_ops::append_outcome(conn, record))
    }

    fn all_outcomes(&self) -> VitaeResult<Vec<EffectivenessRecord>> {
        self.with_reader(effectiveness_ops::all_outcomes)
    }

    fn outcomes_for(&self, subject: &EffectivenessSubject) -> VitaeResult<Vec<EffectivenessRecord>> {
        self.with_reader(|conn| effectiveness_ops::outcomes_for(conn, subject))
    }
}
