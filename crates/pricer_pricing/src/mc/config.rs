//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing runs.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Number of paths per parallel batch when not configured.
pub const DEFAULT_BATCH_SIZE: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Paths per batch in parallel runs.
    batch_size: usize,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of paths per parallel batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches a parallel run is split into.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_paths.div_ceil(self.batch_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API for constructing Monte Carlo configurations
/// with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    batch_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of paths per parallel batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` not set or invalid
    /// - `batch_size` is 0
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            seed: self.seed,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = MonteCarloConfig::builder().n_paths(10_000).build().unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.seed(), None);
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_config_builder_with_seed_and_batch() {
        let config = MonteCarloConfig::builder()
            .n_paths(1000)
            .seed(42)
            .batch_size(300)
            .build()
            .unwrap();

        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.batch_size(), 300);
        assert_eq!(config.n_batches(), 4);
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = MonteCarloConfig::builder().n_paths(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = MonteCarloConfig::builder().n_paths(MAX_PATHS + 1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_max_paths_accepted() {
        assert!(MonteCarloConfig::builder().n_paths(MAX_PATHS).build().is_ok());
    }

    #[test]
    fn test_config_invalid_batch_size() {
        let result = MonteCarloConfig::builder().n_paths(10).batch_size(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidBatchSize(0))));
    }

    #[test]
    fn test_config_missing_paths() {
        let result = MonteCarloConfig::builder().seed(1).build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "n_paths",
                ..
            })
        ));
    }
}
