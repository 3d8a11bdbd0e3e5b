//! Phoenix autocall with coupon memory.

use pricer_core::types::CashFlow;

use super::{AutocallTerms, StepOutcome};
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Phoenix autocall that banks missed coupons.
///
/// Each observation accrues `notional * coupon_rate`. At or above the coupon
/// barrier the whole accrued balance is paid and reset. Then, at or above
/// the call barrier, the notional is repaid and the product ends.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{CashFlow, ObservationSchedule};
/// use pricer_models::instruments::{
///     AutocallTerms, CashFlowProduct, ContractTerms, MemoryPhoenixAutocall,
/// };
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SX5E", schedule, 100.0, 100.0).unwrap();
/// let terms = AutocallTerms::new(contract, 0.05, 80.0).unwrap();
/// let product = MemoryPhoenixAutocall::new(terms, 100.0, 90.0).unwrap();
///
/// let flows = product.cash_flows(&[80.0, 95.0, 101.0]).unwrap();
/// assert_eq!(
///     flows,
///     vec![CashFlow::new(10.0, 2.0), CashFlow::new(5.0, 3.0), CashFlow::new(100.0, 3.0)]
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryPhoenixAutocall {
    terms: AutocallTerms,
    call_barrier: f64,
    coupon_barrier: f64,
}

impl MemoryPhoenixAutocall {
    /// Product type name.
    pub const NAME: &'static str = "MemoryPhoenixAutocall";

    /// Creates a memory phoenix autocall.
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

    /// Memory coupon barrier.
    #[inline]
    pub fn coupon_barrier(&self) -> f64 {
        self.coupon_barrier
    }

    pub(crate) fn evaluate(&self, path: &[f64]) -> Vec<CashFlow> {
        let coupon = self.terms.coupon_amount();
        let notional = self.terms.contract().notional();
        let mut accrued = 0.0;

        self.terms.walk(
            path,
            |_, spot, time, flows| {
                accrued += coupon;
                if spot >= self.coupon_barrier {
                    flows.push(CashFlow::new(accrued, time));
                    accrued = 0.0;
                }
                if spot >= self.call_barrier {
                    flows.push(CashFlow::new(notional, time));
                    return StepOutcome::Terminate;
                }
                StepOutcome::Continue
            },
            |final_spot| self.terms.terminal_redemption(final_spot),
        )
    }
}

impl CashFlowProduct for MemoryPhoenixAutocall {
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
