//! Autocallable products.
//!
//! Every autocall walks the observation schedule as a small state machine:
//! each step applies the variant's barrier tests in order, and the first
//! terminating test ends the walk with that step's flows. Reaching the end of
//! the processed observations falls through to the terminal redemption, paid
//! at the last processed observation time.
//!
//! | Variant | Early exit | Extra behaviour |
//! |---|---|---|
//! | [`SimpleAutocall`] | spot ≥ call barrier | - |
//! | [`StepDownAutocall`] | spot ≥ barrier of the period | barrier vector, last value repeats |
//! | [`AirbagAutocall`] | spot ≥ call barrier | terminal redemption floored |
//! | [`PhoenixAutocall`] | spot ≥ call barrier | conditional periodic coupons |
//! | [`MemoryPhoenixAutocall`] | spot ≥ call barrier | missed coupons are banked |
//!
//! All barrier comparisons are inclusive.

mod airbag;
mod memory_phoenix;
mod phoenix;
mod simple;
mod step_down;

pub use airbag::AirbagAutocall;
pub use memory_phoenix::MemoryPhoenixAutocall;
pub use phoenix::PhoenixAutocall;
pub use simple::SimpleAutocall;
pub use step_down::StepDownAutocall;

use pricer_core::types::CashFlow;

use super::error::{require_finite, InstrumentError};
use super::terms::ContractTerms;

/// Terms shared by every autocall variant.
///
/// # Examples
///
/// ```
/// use pricer_core::types::ObservationSchedule;
/// use pricer_models::instruments::{AutocallTerms, ContractTerms};
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SX5E", schedule, 100.0, 100.0).unwrap();
/// let terms = AutocallTerms::new(contract, 0.05, 80.0).unwrap();
///
/// // Capital protected at or above the protection barrier
/// assert_eq!(terms.terminal_redemption(85.0), 100.0);
/// // Below it the holder bears the full downside
/// assert_eq!(terms.terminal_redemption(70.0), 70.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AutocallTerms {
    contract: ContractTerms,
    coupon_rate: f64,
    protection_barrier: f64,
}

impl AutocallTerms {
    /// Creates autocall terms.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::InvalidParameter`] if `coupon_rate` or
    /// `protection_barrier` is not finite.
    pub fn new(
        contract: ContractTerms,
        coupon_rate: f64,
        protection_barrier: f64,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            contract,
            coupon_rate: require_finite("coupon_rate", coupon_rate)?,
            protection_barrier: require_finite("protection_barrier", protection_barrier)?,
        })
    }

    /// Underlying contract terms.
    #[inline]
    pub fn contract(&self) -> &ContractTerms {
        &self.contract
    }

    /// Coupon rate per observation period.
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Capital protection barrier at maturity.
    #[inline]
    pub fn protection_barrier(&self) -> f64 {
        self.protection_barrier
    }

    /// Early redemption amount: `notional * (1 + coupon_rate)`.
    #[inline]
    pub fn call_amount(&self) -> f64 {
        self.contract.notional() * (1.0 + self.coupon_rate)
    }

    /// Single period coupon: `notional * coupon_rate`.
    #[inline]
    pub fn coupon_amount(&self) -> f64 {
        self.contract.notional() * self.coupon_rate
    }

    /// Standard terminal redemption.
    ///
    /// Pays the notional if `final_spot` is at or above the protection
    /// barrier, otherwise `notional * final_spot / initial_spot`. A
    /// non-positive initial spot pays the notional.
    pub fn terminal_redemption(&self, final_spot: f64) -> f64 {
        let notional = self.contract.notional();
        let initial_spot = self.contract.initial_spot();
        if final_spot >= self.protection_barrier || initial_spot <= 0.0 {
            notional
        } else {
            notional * final_spot / initial_spot
        }
    }

    /// Runs the autocall state machine over `path`.
    ///
    /// `on_step` receives each processed `(spot, time)` pair together with
    /// the flows emitted so far. When no step terminates, `redemption`
    /// maps the last processed spot to the terminal amount, paid at the last
    /// processed time. With no processed steps the initial spot is used and
    /// the redemption is paid at time zero.
    pub(crate) fn walk<F, G>(&self, path: &[f64], mut on_step: F, redemption: G) -> Vec<CashFlow>
    where
        F: FnMut(usize, f64, f64, &mut Vec<CashFlow>) -> StepOutcome,
        G: FnOnce(f64) -> f64,
    {
        let times = self.contract.schedule().times();
        let mut flows = Vec::new();
        let mut last = (self.contract.initial_spot(), 0.0);

        for (i, (&spot, &time)) in path.iter().zip(times).enumerate() {
            if on_step(i, spot, time, &mut flows) == StepOutcome::Terminate {
                return flows;
            }
            last = (spot, time);
        }

        let (final_spot, final_time) = last;
        flows.push(CashFlow::new(redemption(final_spot), final_time));
        flows
    }
}

/// Result of one autocall observation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Keep walking the schedule.
    Continue,
    /// Product redeemed early; stop.
    Terminate,
}
