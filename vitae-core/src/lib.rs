//! # vitae-core
//!
//! Foundation crate for the vitae relevance scoring and adaptive learning core.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod annotation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod skill;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use annotation::{Annotation, AnnotationKind, AnnotationSource, Priority, Relevance, RequirementType};
pub use config::VitaeConfig;
pub use errors::{VitaeError, VitaeResult};
pub use models::{AchievementCandidate, AchievementRecord, LearningMode, SelectionContext};
pub use skill::{Dimension, SkillConfidence, SkillPriors, SkillValue};
