//! Stochastic path simulators (GBM, Heston).
//!
//! This module provides the models that turn an initial spot and an
//! observation schedule into one simulated trajectory:
//! - `PathSimulator` trait: Unified interface for all simulators
//! - `ModelEnum`: Static dispatch enum over the concrete simulators
//! - `GbmModel`: Constant-volatility geometric Brownian motion
//! - `HestonModel`: Two-factor stochastic volatility with full truncation
//!
//! ## Design Philosophy
//!
//! All simulators:
//! - Use static dispatch via enum (not `Box<dyn Trait>`)
//! - Are generic over the random source, consumed in a fixed documented order
//! - Hold only immutable parameters, so one model can serve many threads
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::traits::FixedNormals;
//! use pricer_models::models::{GbmModel, ModelEnum, PathSimulator};
//!
//! let market = MarketSnapshot::new(0.05);
//! let model = ModelEnum::Gbm(GbmModel::new(0.2).unwrap());
//!
//! let times = [1.0, 2.0, 3.0];
//! let mut rng = FixedNormals::new(vec![0.1, -0.4, 0.3]);
//! let path = model.simulate_path(100.0, &times, &market, &mut rng);
//! assert_eq!(path.len(), times.len());
//! ```

pub mod error;
pub mod gbm;
pub mod heston;
pub mod model_enum;
pub mod simulator;

pub use error::ModelError;
pub use gbm::GbmModel;
pub use heston::{HestonError, HestonModel, HestonParams, DEFAULT_MAX_SUBSTEP};
pub use model_enum::ModelEnum;
pub use simulator::{PathSimulator, TwoFactorState, MIN_TIME_STEP};
