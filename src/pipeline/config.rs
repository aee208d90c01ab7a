//! Configuration for the aggregation pipeline.

use thiserror::Error;

use crate::catalog::DEFAULT_CAPACITY;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration for the aggregation coordinator.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of order files scanned concurrently.
    pub max_concurrent_files: usize,
    /// Highest product id the catalog accepts.
    pub catalog_capacity: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: 4,
            catalog_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ORDERSTATS_MAX_CONCURRENT`: Maximum concurrent file scans (default: 4)
    /// - `ORDERSTATS_CATALOG_CAPACITY`: Highest accepted product id (default: 100)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("ORDERSTATS_MAX_CONCURRENT") {
            config.max_concurrent_files =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ORDERSTATS_MAX_CONCURRENT".to_string(),
                    message: format!("'{}' is not a valid count", value),
                })?;
        }

        if let Ok(value) = std::env::var("ORDERSTATS_CATALOG_CAPACITY") {
            config.catalog_capacity =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ORDERSTATS_CATALOG_CAPACITY".to_string(),
                    message: format!("'{}' is not a valid capacity", value),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the maximum number of concurrently scanned files.
    pub fn with_max_concurrent_files(mut self, max: usize) -> Self {
        self.max_concurrent_files = max;
        self
    }

    /// Sets the catalog capacity.
    pub fn with_catalog_capacity(mut self, capacity: u32) -> Self {
        self.catalog_capacity = capacity;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_concurrent_files must be at least 1".to_string(),
            ));
        }

        if self.catalog_capacity == 0 {
            return Err(ConfigError::ValidationFailed(
                "catalog_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
