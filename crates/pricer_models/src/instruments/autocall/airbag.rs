//! Autocall with a floored terminal redemption.

use pricer_core::types::CashFlow;

use super::{AutocallTerms, StepOutcome};
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Simple autocall whose terminal redemption is at least
/// `notional * airbag_floor`.
#[derive(Clone, Debug, PartialEq)]
pub struct AirbagAutocall {
    terms: AutocallTerms,
    call_barrier: f64,
    airbag_floor: f64,
}

impl AirbagAutocall {
    /// Product type name.
    pub const NAME: &'static str = "AirbagAutocall";

    /// Creates an airbag autocall.
    pub fn new(
        terms: AutocallTerms,
        call_barrier: f64,
        airbag_floor: f64,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            terms,
            call_barrier: require_finite("call_barrier", call_barrier)?,
            airbag_floor: require_finite("airbag_floor", airbag_floor)?,
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

    /// Minimum terminal redemption as a fraction of notional.
    #[inline]
    pub fn airbag_floor(&self) -> f64 {
        self.airbag_floor
    }

    /// Standard terminal redemption floored at `notional * airbag_floor`.
    pub fn terminal_redemption(&self, final_spot: f64) -> f64 {
        let floor = self.terms.contract().notional() * self.airbag_floor;
        self.terms.terminal_redemption(final_spot).max(floor)
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
            |final_spot| self.terminal_redemption(final_spot),
        )
    }
}

impl CashFlowProduct for AirbagAutocall {
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
