// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "vitae.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_MAX_SAMPLES_PER_SKILL: usize = 5;

// --- Selection ---
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_TAG_WEIGHT: f64 = 1.0;
pub const DEFAULT_TAG_CAP: f64 = 1.0;
pub const DEFAULT_REQUIREMENT_TOKEN_WEIGHT: f64 = 0.5;
pub const DEFAULT_REQUIREMENT_CAP: f64 = 1.0;
pub const DEFAULT_SIMILARITY_WEIGHT: f64 = 1.0;
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;
pub const DEFAULT_SEMANTIC_TAG_THRESHOLD: f64 = 0.8;

// --- Learning ---
pub const DEFAULT_SOFT_PENALTY_MULTIPLIER: f64 = 0.8;
pub const DEFAULT_FULL_PENALTY_MULTIPLIER: f64 = 0.3;
pub const DEFAULT_CORRECT_PREDICTION_BOOST: f64 = 0.05;
pub const DEFAULT_WRONG_PREDICTION_DECAY: f64 = 0.7;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.05;
pub const DEFAULT_MAX_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_MIN_OBSERVATIONS_FOR_STABILITY: u64 = 3;
pub const DEFAULT_OWNERSHIP_CONFIDENCE_THRESHOLD: f64 = 0.6;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
