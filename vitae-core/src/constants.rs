/// vitae system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of attempts an optimistic priors update is retried.
pub const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Tolerance used when comparing scores for tie-breaks.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Boost factor applied when no annotation touches a candidate.
pub const NEUTRAL_BOOST: f64 = 1.0;
