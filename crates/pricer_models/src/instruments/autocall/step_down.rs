//! Autocall whose call barrier changes per observation period.

use pricer_core::types::CashFlow;

use super::{AutocallTerms, StepOutcome};
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Autocall tested against `call_barriers[i]` at observation `i`.
///
/// If the barrier vector is shorter than the schedule, its last value applies
/// to the remaining observations. Monotonicity of the vector is not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepDownAutocall {
    terms: AutocallTerms,
    call_barriers: Vec<f64>,
}

impl StepDownAutocall {
    /// Product type name.
    pub const NAME: &'static str = "StepDownAutocall";

    /// Creates a step-down autocall.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::EmptyBarrierSchedule`] if `call_barriers` is empty,
    /// [`InstrumentError::InvalidParameter`] if any barrier is not finite.
    pub fn new(terms: AutocallTerms, call_barriers: Vec<f64>) -> Result<Self, InstrumentError> {
        if call_barriers.is_empty() {
            return Err(InstrumentError::EmptyBarrierSchedule);
        }
        for &barrier in &call_barriers {
            require_finite("call_barrier", barrier)?;
        }
        Ok(Self {
            terms,
            call_barriers,
        })
    }

    /// Autocall terms.
    #[inline]
    pub fn autocall_terms(&self) -> &AutocallTerms {
        &self.terms
    }

    /// Per-period call barriers.
    #[inline]
    pub fn call_barriers(&self) -> &[f64] {
        &self.call_barriers
    }

    /// Call barrier applying at observation `index`.
    pub fn barrier_at(&self, index: usize) -> f64 {
        let last = self.call_barriers.len() - 1;
        self.call_barriers[index.min(last)]
    }

    pub(crate) fn evaluate(&self, path: &[f64]) -> Vec<CashFlow> {
        self.terms.walk(
            path,
            |i, spot, time, flows| {
                if spot >= self.barrier_at(i) {
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

impl CashFlowProduct for StepDownAutocall {
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
