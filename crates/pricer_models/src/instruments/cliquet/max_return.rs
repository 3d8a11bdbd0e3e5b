//! Lookback cliquet paying the best observed performance.

use pricer_core::types::CashFlow;

use super::pay_at_maturity;
use crate::instruments::error::InstrumentError;
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Pays `notional * max(0, max_i(spot_i / initial_spot - 1))` at maturity.
///
/// Only the gain is paid, not the notional.
#[derive(Clone, Debug, PartialEq)]
pub struct MaxReturnCliquet {
    contract: ContractTerms,
}

impl MaxReturnCliquet {
    /// Product type name.
    pub const NAME: &'static str = "MaxReturnCliquet";

    /// Creates a max-return cliquet.
    pub fn new(contract: ContractTerms) -> Self {
        Self { contract }
    }

    /// Best return relative to the initial spot, floored at zero.
    pub fn best_return(&self, path: &[f64]) -> f64 {
        let initial_spot = self.contract.initial_spot();
        path.iter()
            .map(|spot| spot / initial_spot - 1.0)
            .fold(0.0, f64::max)
    }

    fn payoff(&self, path: &[f64]) -> f64 {
        if self.contract.initial_spot() <= 0.0 {
            return 0.0;
        }
        self.contract.notional() * self.best_return(path)
    }
}

impl CashFlowProduct for MaxReturnCliquet {
    fn terms(&self) -> &ContractTerms {
        &self.contract
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn cash_flows(&self, path: &[f64]) -> Result<Vec<CashFlow>, InstrumentError> {
        pay_at_maturity(&self.contract, Self::NAME, path, |path| self.payoff(path))
    }
}
