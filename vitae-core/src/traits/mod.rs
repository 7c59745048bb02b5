pub mod achievement_pool;
pub mod embedding;
pub mod storage;

pub use achievement_pool::{IAchievementPool, StaticPool};
pub use embedding::IEmbeddingProvider;
pub use storage::{IAnnotationStorage, IEffectivenessStorage, IPriorsStorage};
