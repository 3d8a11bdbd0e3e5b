//! Error types for the Monte Carlo pricing engine.
//!
//! This module defines structured error types for configuration validation
//! and runtime errors in the Monte Carlo simulation engine.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::ScheduleError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use thiserror::Error;

/// Configuration error for the Monte Carlo pricer and pricing runs.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Zero batch size.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Observation schedule rejected.
    #[error("Invalid observation schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// Market section references an asset it does not quote.
    #[error("Invalid market data: {0}")]
    MarketData(#[from] MarketDataError),

    /// Simulator parameters rejected.
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    /// Product terms rejected.
    #[error("Invalid product: {0}")]
    Instrument(#[from] InstrumentError),

    /// Configuration file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Configuration text is not valid TOML for a pricing run.
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime pricing error.
///
/// Any error aborts the whole run; no partial result is returned.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The product's underlying is missing from the market snapshot.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// A trajectory could not be evaluated.
    #[error("Evaluation error: {0}")]
    Instrument(#[from] InstrumentError),

    /// The run configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidBatchSize(0);
        assert!(err.to_string().contains("Invalid batch size 0"));

        let err = ConfigError::InvalidParameter {
            name: "volatility",
            value: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("volatility"));
    }

    #[test]
    fn test_conversions() {
        let err: ConfigError = ModelError::InvalidVolatility(-1.0).into();
        assert!(matches!(err, ConfigError::Model(_)));

        let err: PricingError = MarketDataError::UnknownAsset {
            asset: "XYZ".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Market data error: Underlying not found: XYZ"
        );

        let err: PricingError = InstrumentError::EmptyPath {
            product: "MaxReturnCliquet",
        }
        .into();
        assert!(err.to_string().contains("MaxReturnCliquet path is empty"));
    }
}
