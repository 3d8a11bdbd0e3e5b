//! Monte Carlo pricing of structured products.
//!
//! This module provides the simulation driver that turns a product, a path
//! simulator and a market snapshot into a price estimate.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (path count, seed, batch size)
//! ├── PricerRng         (seeded standard normal draws)
//! └── Orchestration
//!     ├── PathSimulator::simulate_path()
//!     ├── CashFlowProduct::cash_flows()
//!     └── discounting and aggregation
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::ObservationSchedule;
//! use pricer_models::instruments::{
//!     AutocallTerms, ContractTerms, PhoenixAutocall, StructuredProduct,
//! };
//! use pricer_models::models::{GbmModel, ModelEnum};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let market = MarketSnapshot::new(0.03).with_quote("SX5E", 100.0, 0.2);
//! let schedule = ObservationSchedule::uniform(4, 1.0).unwrap();
//! let contract = ContractTerms::new("SX5E", schedule, 100.0, 1_000.0).unwrap();
//! let terms = AutocallTerms::new(contract, 0.02, 70.0).unwrap();
//! let product = StructuredProduct::from(PhoenixAutocall::new(terms, 100.0, 80.0).unwrap());
//! let model = ModelEnum::Gbm(GbmModel::new(0.2).unwrap());
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(5_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let pricer = MonteCarloPricer::new(config).unwrap();
//!
//! let result = pricer.price_parallel(&product, &model, &market).unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```

pub mod config;
pub mod error;
pub mod pricer;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, MAX_PATHS};
pub use error::{ConfigError, PricingError};
pub use pricer::{MonteCarloPricer, PricingResult};
