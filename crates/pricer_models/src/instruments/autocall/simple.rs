//! Vanilla autocall with a constant call barrier.

use pricer_core::types::CashFlow;

use super::{AutocallTerms, StepOutcome};
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Autocall redeeming early at `notional * (1 + coupon_rate)` on the first
/// observation at or above the call barrier.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{CashFlow, ObservationSchedule};
/// use pricer_models::instruments::{AutocallTerms, CashFlowProduct, ContractTerms, SimpleAutocall};
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SX5E", schedule, 100.0, 100.0).unwrap();
/// let terms = AutocallTerms::new(contract, 0.05, 80.0).unwrap();
/// let product = SimpleAutocall::new(terms, 100.0).unwrap();
///
/// let flows = product.cash_flows(&[90.0, 95.0, 101.0]).unwrap();
/// assert_eq!(flows, vec![CashFlow::new(105.0, 3.0)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleAutocall {
    terms: AutocallTerms,
    call_barrier: f64,
}

impl SimpleAutocall {
    /// Product type name.
    pub const NAME: &'static str = "SimpleAutocall";

    /// Creates a simple autocall.
    pub fn new(terms: AutocallTerms, call_barrier: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            terms,
            call_barrier: require_finite("call_barrier", call_barrier)?,
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

    pub(crate) fn evaluate(&self, path: &[f64]) -> Vec<CashFlow> {
        self.terms.walk(
            path,
            |_, spot, time, flows| {
                if spot >= self.call_barrier {
                    flows.push(CashFlow::new(self.terms.call_amount(), time));
                    StepOutcome::Terminate
                } else {
                    StepOutcome::Continue
                }
            },
            |final_spot| self.terms.terminal_redemption(final_spot),
        )
    }
}

impl CashFlowProduct for SimpleAutocall {
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
