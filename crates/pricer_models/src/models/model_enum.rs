//! Static dispatch enum for path simulators.
//!
//! This module provides `ModelEnum` for zero-cost abstraction over the
//! concrete simulators (GBM, Heston). The pricing driver holds one `ModelEnum`
//! and never needs a trait object.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: All model dispatch via `match` expressions
//! - **Zero-cost abstraction**: No vtable overhead
//! - **Shareable**: Variants are `Copy` and immutable, safe to lend across threads
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{GbmModel, HestonModel, HestonParams, ModelEnum, PathSimulator};
//!
//! let gbm = ModelEnum::Gbm(GbmModel::new(0.2).unwrap());
//! assert_eq!(gbm.model_name(), "GBM");
//! assert!(!gbm.is_two_factor());
//!
//! let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap();
//! let heston = ModelEnum::from(HestonModel::new(params));
//! assert_eq!(heston.model_name(), "Heston");
//! assert!(heston.is_two_factor());
//! ```

use pricer_core::market_data::MarketSnapshot;
use pricer_core::traits::NormalSource;

use super::gbm::GbmModel;
use super::heston::HestonModel;
use super::simulator::PathSimulator;

/// Closed set of supported path simulators.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ModelEnum {
    /// Constant-volatility geometric Brownian motion
    Gbm(GbmModel),
    /// Heston stochastic volatility with full truncation
    Heston(HestonModel),
}

impl ModelEnum {
    /// Whether the model carries a variance factor alongside the spot.
    pub fn is_two_factor(&self) -> bool {
        matches!(self, ModelEnum::Heston(_))
    }
}

impl From<GbmModel> for ModelEnum {
    fn from(model: GbmModel) -> Self {
        ModelEnum::Gbm(model)
    }
}

impl From<HestonModel> for ModelEnum {
    fn from(model: HestonModel) -> Self {
        ModelEnum::Heston(model)
    }
}

impl PathSimulator for ModelEnum {
    #[inline]
    fn simulate_path<R: NormalSource + ?Sized>(
        &self,
        initial_spot: f64,
        times: &[f64],
        market: &MarketSnapshot,
        rng: &mut R,
    ) -> Vec<f64> {
        match self {
            ModelEnum::Gbm(model) => model.simulate_path(initial_spot, times, market, rng),
            ModelEnum::Heston(model) => model.simulate_path(initial_spot, times, market, rng),
        }
    }

    fn draws_per_path(&self, times: &[f64]) -> usize {
        match self {
            ModelEnum::Gbm(model) => model.draws_per_path(times),
            ModelEnum::Heston(model) => model.draws_per_path(times),
        }
    }

    fn model_name(&self) -> &'static str {
        match self {
            ModelEnum::Gbm(model) => model.model_name(),
            ModelEnum::Heston(model) => model.model_name(),
        }
    }
}
