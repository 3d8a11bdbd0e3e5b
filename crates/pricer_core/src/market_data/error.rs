//! Market data error types.
//!
//! This module provides structured error handling for market snapshot lookups.

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `UnknownAsset`: No quote stored for the requested asset
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnknownAsset { asset: "SX5E".to_string() };
/// assert_eq!(format!("{}", err), "Underlying not found: SX5E");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// No quote stored for the requested asset.
    #[error("Underlying not found: {asset}")]
    UnknownAsset {
        /// The requested asset identifier
        asset: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_asset_display() {
        let err = MarketDataError::UnknownAsset {
            asset: "CAC40".to_string(),
        };
        assert_eq!(format!("{}", err), "Underlying not found: CAC40");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MarketDataError::UnknownAsset {
            asset: "X".to_string(),
        };
        let _: &dyn std::error::Error = &err;
    }
}
