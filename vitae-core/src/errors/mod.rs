mod config_error;
mod embedding_error;
mod storage_error;
mod vitae_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;
pub use vitae_error::{VitaeError, VitaeResult};
