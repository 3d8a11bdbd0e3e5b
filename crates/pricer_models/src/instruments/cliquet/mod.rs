//! Cliquet (ratchet) products.
//!
//! Cliquets never redeem early. Each variant reduces the path to a single
//! amount, paid once at the final scheduled observation through
//! a shared pay-at-maturity wrapper.

mod capped_coupon;
mod max_return;

pub use capped_coupon::CappedCouponCliquet;
pub use max_return::MaxReturnCliquet;

use pricer_core::types::CashFlow;

use super::error::InstrumentError;
use super::terms::ContractTerms;

/// Wraps a path payoff into a single cash flow at the schedule maturity.
///
/// `payoff` sees at most `schedule.len()` spots; extra path entries are
/// ignored.
///
/// # Errors
///
/// [`InstrumentError::EmptyPath`] if `path` is empty; `payoff` is not called.
pub(crate) fn pay_at_maturity<F>(
    contract: &ContractTerms,
    product: &'static str,
    path: &[f64],
    payoff: F,
) -> Result<Vec<CashFlow>, InstrumentError>
where
    F: FnOnce(&[f64]) -> f64,
{
    if path.is_empty() {
        return Err(InstrumentError::EmptyPath { product });
    }
    let steps = path.len().min(contract.schedule().len());
    let amount = payoff(&path[..steps]);
    Ok(vec![CashFlow::new(amount, contract.schedule().maturity())])
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pricer_core::types::ObservationSchedule;

    pub fn contract_with(initial_spot: f64) -> ContractTerms {
        let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
        ContractTerms::new("SPX", schedule, initial_spot, 100.0).unwrap()
    }

    pub fn contract() -> ContractTerms {
        contract_with(100.0)
    }
}
