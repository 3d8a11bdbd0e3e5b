//! Sum-of-local-caps cliquet.

use pricer_core::types::CashFlow;

use super::pay_at_maturity;
use crate::instruments::error::{require_finite, InstrumentError};
use crate::instruments::terms::ContractTerms;
use crate::instruments::traits::CashFlowProduct;

/// Cliquet locking in a capped coupon per period.
///
/// Per observation, `ret = spot / baseline - 1` is floored at zero, scaled by
/// the participation and clamped to `[0, cap]`; the baseline then resets to
/// the observed spot. Pays `notional * (1 + Σ coupons)` at maturity.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{CashFlow, ObservationSchedule};
/// use pricer_models::instruments::{CappedCouponCliquet, CashFlowProduct, ContractTerms};
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SPX", schedule, 100.0, 100.0).unwrap();
/// let cliquet = CappedCouponCliquet::new(contract, 1.0, 0.05).unwrap();
///
/// let flows = cliquet.cash_flows(&[110.0, 108.0, 130.0]).unwrap();
/// assert_eq!(flows.len(), 1);
/// assert!((flows[0].amount - 110.0).abs() < 1e-12);
/// assert_eq!(flows[0].time, 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CappedCouponCliquet {
    contract: ContractTerms,
    participation: f64,
    cap: f64,
}

impl CappedCouponCliquet {
    /// Product type name.
    pub const NAME: &'static str = "CappedCouponCliquet";

    /// Creates a capped-coupon cliquet.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::InvalidParameter`] if `participation` is not finite
    /// or `cap` is not finite and non-negative.
    pub fn new(contract: ContractTerms, participation: f64, cap: f64) -> Result<Self, InstrumentError> {
        require_finite("participation", participation)?;
        if !cap.is_finite() || cap < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                name: "cap",
                value: cap,
            });
        }
        Ok(Self {
            contract,
            participation,
            cap,
        })
    }

    /// Participation in each period's return.
    #[inline]
    pub fn participation(&self) -> f64 {
        self.participation
    }

    /// Per-period coupon cap.
    #[inline]
    pub fn cap(&self) -> f64 {
        self.cap
    }

    /// Sum of capped period coupons over `path`.
    pub fn coupon_sum(&self, path: &[f64]) -> f64 {
        let mut baseline = self.contract.initial_spot();
        let mut sum = 0.0;

        for &spot in path {
            if baseline > 0.0 {
                let ret = (spot / baseline - 1.0).max(0.0);
                sum += (self.participation * ret).clamp(0.0, self.cap);
            }
            baseline = spot;
        }

        sum
    }

    fn payoff(&self, path: &[f64]) -> f64 {
        let notional = self.contract.notional();
        if self.contract.initial_spot() <= 0.0 {
            return notional;
        }
        notional * (1.0 + self.coupon_sum(path))
    }
}

impl CashFlowProduct for CappedCouponCliquet {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::cliquet::test_support::{contract, contract_with};
    use approx::assert_relative_eq;

    #[test]
    fn test_cap_and_floor_per_period() {
        let cliquet = CappedCouponCliquet::new(contract(), 1.0, 0.05).unwrap();
        let flows = cliquet.cash_flows(&[110.0, 108.0, 130.0]).unwrap();

        // +10% capped at 5%, -1.8% floored at 0, +20.4% capped at 5%
        assert_eq!(flows.len(), 1);
        assert_relative_eq!(flows[0].amount, 110.0, max_relative = 1e-12);
        assert_eq!(flows[0].time, 3.0);
    }

    #[test]
    fn test_long_path_ignores_spots_past_schedule() {
        let cliquet = CappedCouponCliquet::new(contract(), 1.0, 0.05).unwrap();
        let flows = cliquet
            .cash_flows(&[100.0, 100.0, 100.0, 200.0, 300.0])
            .unwrap();
        assert_eq!(flows, vec![CashFlow::new(100.0, 3.0)]);
    }

    #[test]
    fn test_participation_scales_returns() {
        let cliquet = CappedCouponCliquet::new(contract(), 0.5, 0.10).unwrap();
        // +4% * 0.5 = 2%, then +10% * 0.5 = 5%
        assert_relative_eq!(cliquet.coupon_sum(&[104.0, 114.4]), 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_participation_yields_zero_coupons() {
        let cliquet = CappedCouponCliquet::new(contract(), -1.0, 0.10).unwrap();
        assert_eq!(cliquet.coupon_sum(&[120.0, 140.0]), 0.0);
    }

    #[test]
    fn test_non_positive_path_spot_resets_baseline() {
        let cliquet = CappedCouponCliquet::new(contract(), 1.0, 1.0).unwrap();
        // 0 → no coupon and baseline 0; next period skipped; then 50 → 60 = +20%
        assert_relative_eq!(
            cliquet.coupon_sum(&[0.0, 50.0, 60.0]),
            0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_non_positive_initial_spot_pays_notional() {
        let cliquet = CappedCouponCliquet::new(contract_with(0.0), 1.0, 0.05).unwrap();
        let flows = cliquet.cash_flows(&[110.0, 120.0]).unwrap();
        assert_eq!(flows, vec![CashFlow::new(100.0, 3.0)]);
    }

    #[test]
    fn test_empty_path_is_error() {
        let cliquet = CappedCouponCliquet::new(contract(), 1.0, 0.05).unwrap();
        assert_eq!(
            cliquet.cash_flows(&[]),
            Err(InstrumentError::EmptyPath {
                product: "CappedCouponCliquet"
            })
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(CappedCouponCliquet::new(contract(), f64::NAN, 0.05).is_err());
        assert!(CappedCouponCliquet::new(contract(), 1.0, -0.01).is_err());
        assert!(CappedCouponCliquet::new(contract(), 1.0, f64::INFINITY).is_err());
        assert!(CappedCouponCliquet::new(contract(), 1.0, 0.0).is_ok());
    }
}
