//! Market data for structured product pricing.
//!
//! A pricing run builds one [`MarketSnapshot`] and lends it read-only to the
//! path simulators and the pricing driver. The snapshot holds a single
//! continuously-compounded risk-free rate and, per asset, an initial spot and
//! volatility.
//!
//! # Components
//!
//! - [`snapshot`]: `MarketSnapshot` and `Quote`
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::MarketSnapshot;
//!
//! let market = MarketSnapshot::new(0.02).with_quote("SX5E", 4200.0, 0.18);
//! assert_eq!(market.quote("SX5E").unwrap().volatility, 0.18);
//! assert!(market.quote("SPX").is_err());
//! ```

pub mod error;
pub mod snapshot;

pub use error::MarketDataError;
pub use snapshot::{MarketSnapshot, Quote};
