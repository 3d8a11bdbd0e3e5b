//! PathSimulator trait for a unified path generation interface.
//!
//! This module defines the core trait abstraction for stochastic path
//! simulators (GBM, Heston), giving the pricing driver a single way to turn
//! an initial spot and an observation schedule into a trajectory.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch only**: Use `ModelEnum`, not `Box<dyn PathSimulator>`
//! - **Generic random source**: Any [`NormalSource`] can drive a simulator
//! - **Read-only market**: Simulators only read the snapshot's risk-free rate
//!
//! ## Contract
//!
//! For an observation slice `times`, `simulate_path` returns exactly
//! `times.len()` spots, where entry `i` is the simulated spot at `times[i]`.
//! Time starts at zero; a gap between consecutive times smaller than
//! [`MIN_TIME_STEP`] (including negative gaps) carries the spot forward
//! without consuming any draw.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::traits::NormalSource;

/// Time increments at or below this floor are treated as zero.
pub const MIN_TIME_STEP: f64 = 1e-8;

/// Two-factor state (spot and instantaneous variance).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoFactorState {
    /// Spot price
    pub spot: f64,
    /// Instantaneous variance (may go negative under discretisation)
    pub variance: f64,
}

/// Unified trait interface for path simulators.
///
/// # Static Dispatch Only
///
/// The generic random-source parameter makes this trait unsuitable for trait
/// objects; dispatch through [`ModelEnum`](super::ModelEnum) instead.
pub trait PathSimulator {
    /// Simulates one trajectory sampled at `times`.
    ///
    /// # Arguments
    /// * `initial_spot` - Spot at time zero
    /// * `times` - Observation times in years (expected non-decreasing)
    /// * `market` - Snapshot providing the risk-free rate
    /// * `rng` - Random source, consumed in the model's documented order
    ///
    /// # Returns
    /// One spot per entry of `times`.
    fn simulate_path<R: NormalSource + ?Sized>(
        &self,
        initial_spot: f64,
        times: &[f64],
        market: &MarketSnapshot,
        rng: &mut R,
    ) -> Vec<f64>;

    /// Number of draws one call to `simulate_path` consumes for `times`.
    fn draws_per_path(&self, times: &[f64]) -> usize;

    /// Model name for logging and debugging.
    fn model_name(&self) -> &'static str;
}

/// Iterates the positive time increments between consecutive observations,
/// starting from zero and clamping negative gaps to zero.
pub(crate) fn observation_gaps(times: &[f64]) -> impl Iterator<Item = f64> + '_ {
    let mut previous = 0.0;
    times.iter().map(move |&t| {
        let dt = (t - previous).max(0.0);
        previous = t;
        dt
    })
}
