//! Builder for constructing drivers.

use super::config::DriveConfig;
use super::error::ConfigError;
use super::Driver;

/// Builder for a [`Driver`] with a fluent API.
///
/// ```rust
/// use tributary::drive::DriverBuilder;
///
/// let driver = DriverBuilder::new().chunk_size(16).max_batches(4).build().unwrap();
/// assert_eq!(driver.config().chunk_size, 16);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DriverBuilder {
    config: DriveConfig,
}

impl DriverBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config.
    pub fn config(mut self, config: DriveConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of elements per batch.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Stop after delivering `limit` batches.
    pub fn max_batches(mut self, limit: usize) -> Self {
        self.config.max_batches = Some(limit);
        self
    }

    /// Build the driver.
    /// Returns an error if any setting is invalid.
    pub fn build(self) -> Result<Driver, ConfigError> {
        self.config.validate()?;
        Ok(Driver {
            config: self.config,
        })
    }
}
