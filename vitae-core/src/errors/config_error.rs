/// Configuration errors. Raised at load time, never mid-request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },
}
