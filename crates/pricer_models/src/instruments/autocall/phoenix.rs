//! Phoenix autocall paying conditional periodic coupons.

use pricer_core::types::CashFlow;

use super::{AutocallTerms, StepOutcome};
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Autocall that pays `notional * coupon_rate` on every observation at or
/// above the coupon barrier while it stays alive.
///
/// The call test runs first: a step at or above the call barrier pays
/// `notional * (1 + coupon_rate)` and nothing else. Otherwise the coupon test
/// runs. Coupons never terminate the product.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{CashFlow, ObservationSchedule};
/// use pricer_models::instruments::{AutocallTerms, CashFlowProduct, ContractTerms, PhoenixAutocall};
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SX5E", schedule, 100.0, 100.0).unwrap();
/// let terms = AutocallTerms::new(contract, 0.05, 80.0).unwrap();
/// let product = PhoenixAutocall::new(terms, 100.0, 90.0).unwrap();
///
/// let flows = product.cash_flows(&[95.0, 85.0, 101.0]).unwrap();
/// assert_eq!(flows, vec![CashFlow::new(5.0, 1.0), CashFlow::new(105.0, 3.0)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PhoenixAutocall {
    terms: AutocallTerms,
    call_barrier: f64,
    coupon_barrier: f64,
}

impl PhoenixAutocall {
    /// Product type name.
    pub const NAME: &'static str = "PhoenixAutocall";

    /// Creates a phoenix autocall.
    pub fn new(
        terms: AutocallTerms,
        call_barrier: f64,
        coupon_barrier: f64,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            terms,
            call_barrier: require_finite("call_barrier", call_barrier)?,
            coupon_barrier: require_finite("coupon_barrier", coupon_barrier)?,
        })
    }

    /// Autocall terms.
    #[inline]
    pub fn autocall_terms(&self) -> &AutocallTerms {
        &self.terms
    }

    /// Early redemption barrier.
    #[inline]
    pub fn call_barrier(&self) -> f64 {
        self.call_barrier
    }

    /// Periodic coupon barrier.
    #[inline]
    pub fn coupon_barrier(&self) -> f64 {
        self.coupon_barrier
    }

    pub(crate) fn evaluate(&self, path: &[f64]) -> Vec<CashFlow> {
        self.terms.walk(
            path,
            |_, spot, time, flows| {
                if spot >= self.call_barrier {
                    flows.push(CashFlow::new(self.terms.call_amount(), time));
                    return StepOutcome::Terminate;
                }
                if spot >= self.coupon_barrier {
                    flows.push(CashFlow::new(self.terms.coupon_amount(), time));
                }
                StepOutcome::Continue
            },
            |final_spot| self.terms.terminal_redemption(final_spot),
        )
    }
}

impl CashFlowProduct for PhoenixAutocall {
    fn terms(&self) -> &ContractTerms {
        self.terms.contract()
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn cash_flows(&self, path: &[f64]) -> Result<Vec<CashFlow>, InstrumentError> {
        Ok(self.evaluate(path))
    }
}
