use crate::annotation::Annotation;
use crate::errors::VitaeResult;
use crate::models::{EffectivenessRecord, EffectivenessSubject, SkillSample};
use crate::skill::{Dimension, SkillConfidence, SkillPriors};

/// Durable per-skill confidence records.
///
/// Every write touches exactly one `(skill, dimension)` field or the avoid
/// flag. Nothing replaces a whole priors document.
pub trait IPriorsStorage: Send + Sync {
    /// `None` when the skill has never been observed.
    fn get_priors(&self, skill: &str) -> VitaeResult<Option<SkillPriors>>;

    /// Unconditional upsert of a single dimension.
    fn upsert_dimension(
        &self,
        skill: &str,
        dimension: Dimension,
        confidence: &SkillConfidence,
    ) -> VitaeResult<()>;

    /// Write `confidence` only if the stored `observation_count` for this
    /// dimension still equals `expected_observations` (0 when absent).
    /// Returns `false` when another writer got there first.
    fn compare_and_upsert(
        &self,
        skill: &str,
        dimension: Dimension,
        expected_observations: u64,
        confidence: &SkillConfidence,
    ) -> VitaeResult<bool>;

    fn set_avoid(&self, skill: &str, avoid: bool) -> VitaeResult<()>;

    /// All skills with at least one stored row.
    fn list_skills(&self) -> VitaeResult<Vec<String>>;

    /// Store a new sample set under the next version, replacing earlier
    /// samples, and return that version. The version is one more than the
    /// highest stored, assigned in the same transaction as the write.
    fn replace_skill_samples(&self, samples: &[SkillSample]) -> VitaeResult<u64>;

    /// Latest embedding version and its samples. Version 0 means never built.
    fn load_skill_samples(&self) -> VitaeResult<(u64, Vec<SkillSample>)>;
}

/// Annotation persistence. Annotations are never deleted, only deactivated.
pub trait IAnnotationStorage: Send + Sync {
    fn create_annotation(&self, annotation: &Annotation) -> VitaeResult<()>;
    fn get_annotation(&self, id: &str) -> VitaeResult<Option<Annotation>>;
    fn update_annotation(&self, annotation: &Annotation) -> VitaeResult<()>;
    fn list_active_annotations(&self) -> VitaeResult<Vec<Annotation>>;
    fn list_all_annotations(&self) -> VitaeResult<Vec<Annotation>>;
}

/// Append-only outcome log.
pub trait IEffectivenessStorage: Send + Sync {
    fn append_outcome(&self, record: &EffectivenessRecord) -> VitaeResult<()>;
    fn all_outcomes(&self) -> VitaeResult<Vec<EffectivenessRecord>>;
    fn outcomes_for(&self, subject: &EffectivenessSubject) -> VitaeResult<Vec<EffectivenessRecord>>;
}
