//! Serializable driver settings.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Number of elements per batch when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// How a [`Driver`](super::Driver) splits input and when it stops.
///
/// ```rust
/// use tributary::drive::DriveConfig;
///
/// let config = DriveConfig::from_json(r#"{ "chunk_size": 8 }"#).unwrap();
/// assert_eq!(config.chunk_size, 8);
/// assert_eq!(config.max_batches, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Maximum number of elements delivered per batch.
    pub chunk_size: usize,

    /// Stop after delivering this many batches. `None` means no limit.
    pub max_batches: Option<usize>,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_batches: None,
        }
    }
}

impl DriveConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }

        match self.max_batches {
            Some(0) => Err(ConfigError::InvalidMaxBatches(0)),
            _ => Ok(()),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
