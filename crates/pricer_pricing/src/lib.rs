//! # Pricer Engine (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing drives Monte Carlo valuation of the structured products in
//! `pricer_models`:
//! - Seeded random source ([`rng::PricerRng`])
//! - Sequential and rayon-parallel pricing ([`mc::MonteCarloPricer`])
//! - TOML pricing-run configuration ([`config::PricingRunConfig`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): cash flows, schedules, market snapshot, `NormalSource`
//! - Layer 2 (pricer_models): `PathSimulator`, `StructuredProduct`
//!
//! ## Logging
//!
//! The engine emits `tracing` events (run start and finish at `info`, batches
//! at `debug`, abandoned runs at `warn`). No subscriber is installed; binaries
//! and tests choose their own.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::config::PricingRunConfig;
//!
//! let config = PricingRunConfig::from_toml_str(r#"
//!     [market]
//!     risk_free_rate = 0.02
//!     quotes = { SX5E = { spot = 100.0, volatility = 0.25 } }
//!
//!     [model]
//!     type = "gbm"
//!
//!     [product]
//!     type = "memory_phoenix"
//!     underlying = "SX5E"
//!     observation_times = [0.5, 1.0, 1.5, 2.0]
//!     initial_spot = 100.0
//!     notional = 100.0
//!     coupon_rate = 0.03
//!     protection_barrier = 60.0
//!     call_barrier = 100.0
//!     coupon_barrier = 75.0
//!
//!     [monte_carlo]
//!     n_paths = 2000
//!     seed = 7
//! "#).unwrap();
//!
//! let result = config.build().unwrap().run().unwrap();
//! assert!(result.price > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod mc;
pub mod rng;

pub use config::{PricingRun, PricingRunConfig};
pub use mc::{MonteCarloConfig, MonteCarloPricer, PricingError, PricingResult};
