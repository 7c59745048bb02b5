pub mod achievement;
pub mod candidate;
pub mod degradation_event;
pub mod effectiveness;
pub mod feedback;
pub mod selection;
pub mod skill_sample;

pub use achievement::{AchievementRecord, SelectionContext};
pub use candidate::AchievementCandidate;
pub use degradation_event::DegradationEvent;
pub use effectiveness::{EffectivenessRecord, EffectivenessSubject, Outcome};
pub use feedback::{FeedbackAction, FeedbackEvent, LearningMode, SectionContext, SectionKind};
pub use selection::{Selection, SelectionWarning};
pub use skill_sample::{EmbeddingSnapshot, SkillSample};
