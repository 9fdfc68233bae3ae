//! Driver configuration errors.

use thiserror::Error;

/// Errors that can occur when configuring a [`Driver`](super::Driver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Chunk size must be at least 1, got {0}")]
    InvalidChunkSize(usize),

    #[error("Batch limit must be at least 1 when set, got {0}")]
    InvalidMaxBatches(usize),

    #[error("Failed to parse driver config: {0}")]
    Parse(String),
}
