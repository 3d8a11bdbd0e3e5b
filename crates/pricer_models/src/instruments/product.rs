//! Static dispatch enum over every structured product.

use pricer_core::types::CashFlow;

use super::autocall::{
    AirbagAutocall, MemoryPhoenixAutocall, PhoenixAutocall, SimpleAutocall, StepDownAutocall,
};
use super::cliquet::{CappedCouponCliquet, MaxReturnCliquet};
use super::error::InstrumentError;
use super::terms::ContractTerms;
use super::traits::CashFlowProduct;

/// Closed set of supported structured products.
///
/// # Examples
///
/// ```
/// use pricer_core::types::ObservationSchedule;
/// use pricer_models::instruments::{
///     CashFlowProduct, ContractTerms, MaxReturnCliquet, StructuredProduct,
/// };
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let contract = ContractTerms::new("SPX", schedule, 100.0, 100.0).unwrap();
/// let product = StructuredProduct::from(MaxReturnCliquet::new(contract));
///
/// assert_eq!(product.name(), "MaxReturnCliquet");
/// assert!(!product.is_autocall());
/// let value = product.discounted_value(&[100.0, 130.0, 90.0], 0.0).unwrap();
/// assert!((value - 30.0).abs() < 1e-10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum StructuredProduct {
    /// Constant call barrier autocall
    Simple(SimpleAutocall),
    /// Per-period call barrier autocall
    StepDown(StepDownAutocall),
    /// Autocall with floored terminal redemption
    Airbag(AirbagAutocall),
    /// Autocall with conditional periodic coupons
    Phoenix(PhoenixAutocall),
    /// Phoenix autocall with coupon memory
    MemoryPhoenix(MemoryPhoenixAutocall),
    /// Sum-of-local-caps cliquet
    CappedCoupon(CappedCouponCliquet),
    /// Lookback best-return cliquet
    MaxReturn(MaxReturnCliquet),
}

impl StructuredProduct {
    /// Whether the product can redeem before maturity.
    pub fn is_autocall(&self) -> bool {
        !matches!(
            self,
            StructuredProduct::CappedCoupon(_) | StructuredProduct::MaxReturn(_)
        )
    }
}

macro_rules! dispatch {
    ($self:ident, $product:ident => $body:expr) => {
        match $self {
            StructuredProduct::Simple($product) => $body,
            StructuredProduct::StepDown($product) => $body,
            StructuredProduct::Airbag($product) => $body,
            StructuredProduct::Phoenix($product) => $body,
            StructuredProduct::MemoryPhoenix($product) => $body,
            StructuredProduct::CappedCoupon($product) => $body,
            StructuredProduct::MaxReturn($product) => $body,
        }
    };
}

impl CashFlowProduct for StructuredProduct {
    fn terms(&self) -> &ContractTerms {
        dispatch!(self, product => product.terms())
    }

    fn name(&self) -> &'static str {
        dispatch!(self, product => product.name())
    }

    #[inline]
    fn cash_flows(&self, path: &[f64]) -> Result<Vec<CashFlow>, InstrumentError> {
        dispatch!(self, product => product.cash_flows(path))
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for StructuredProduct {
                fn from(product: $ty) -> Self {
                    StructuredProduct::$variant(product)
                }
            }
        )*
    };
}

impl_from!(
    Simple(SimpleAutocall),
    StepDown(StepDownAutocall),
    Airbag(AirbagAutocall),
    Phoenix(PhoenixAutocall),
    MemoryPhoenix(MemoryPhoenixAutocall),
    CappedCoupon(CappedCouponCliquet),
    MaxReturn(MaxReturnCliquet),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::AutocallTerms;
    use approx::assert_relative_eq;
    use pricer_core::types::{discounted_sum, ObservationSchedule};
    use proptest::prelude::*;

    fn contract() -> ContractTerms {
        let schedule = ObservationSchedule::new(vec![0.5, 1.0, 1.5, 2.0]).unwrap();
        ContractTerms::new("SX5E", schedule, 100.0, 1_000.0).unwrap()
    }

    fn autocall_terms() -> AutocallTerms {
        AutocallTerms::new(contract(), 0.04, 70.0).unwrap()
    }

    fn all_products() -> Vec<StructuredProduct> {
        vec![
            SimpleAutocall::new(autocall_terms(), 105.0).unwrap().into(),
            StepDownAutocall::new(autocall_terms(), vec![110.0, 105.0, 100.0])
                .unwrap()
                .into(),
            AirbagAutocall::new(autocall_terms(), 105.0, 0.5).unwrap().into(),
            PhoenixAutocall::new(autocall_terms(), 105.0, 85.0).unwrap().into(),
            MemoryPhoenixAutocall::new(autocall_terms(), 105.0, 85.0)
                .unwrap()
                .into(),
            CappedCouponCliquet::new(contract(), 1.0, 0.05).unwrap().into(),
            MaxReturnCliquet::new(contract()).into(),
        ]
    }

    #[test]
    fn test_names_and_kinds() {
        let names: Vec<_> = all_products().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "SimpleAutocall",
                "StepDownAutocall",
                "AirbagAutocall",
                "PhoenixAutocall",
                "MemoryPhoenixAutocall",
                "CappedCouponCliquet",
                "MaxReturnCliquet",
            ]
        );
        let autocalls = all_products().iter().filter(|p| p.is_autocall()).count();
        assert_eq!(autocalls, 5);
    }

    #[test]
    fn test_shared_accessors() {
        for product in all_products() {
            assert_eq!(product.underlying(), "SX5E");
            assert_eq!(product.notional(), 1_000.0);
            assert_eq!(product.initial_spot(), 100.0);
            assert_eq!(product.observation_times(), &[0.5, 1.0, 1.5, 2.0]);
            assert_eq!(product.schedule().maturity(), 2.0);
        }
    }

    #[test]
    fn test_dispatch_matches_concrete() {
        let concrete = PhoenixAutocall::new(autocall_terms(), 105.0, 85.0).unwrap();
        let wrapped = StructuredProduct::from(concrete.clone());
        let path = [90.0, 80.0, 95.0, 60.0];
        assert_eq!(
            wrapped.cash_flows(&path).unwrap(),
            concrete.cash_flows(&path).unwrap()
        );
    }

    #[test]
    fn test_cliquets_reject_empty_path_autocalls_do_not() {
        for product in all_products() {
            let result = product.cash_flows(&[]);
            assert_eq!(result.is_ok(), product.is_autocall(), "{}", product.name());
        }
    }

    fn arb_path() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(1.0_f64..200.0, 0..8)
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_idempotent(path in arb_path()) {
            for product in all_products() {
                let first = product.cash_flows(&path);
                let second = product.cash_flows(&path);
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn prop_flows_chronological_and_bounded(path in arb_path()) {
            for product in all_products() {
                if let Ok(flows) = product.cash_flows(&path) {
                    prop_assert!(!flows.is_empty());
                    prop_assert!(flows.windows(2).all(|w| w[0].time <= w[1].time));
                    let maturity = product.schedule().maturity();
                    prop_assert!(flows.iter().all(|f| f.time >= 0.0 && f.time <= maturity));
                }
            }
        }

        #[test]
        fn prop_discounted_value_agrees_with_flows(
            path in prop::collection::vec(1.0_f64..200.0, 1..8),
            rate in -0.02_f64..0.10,
        ) {
            for product in all_products() {
                let flows = product.cash_flows(&path).unwrap();
                let value = product.discounted_value(&path, rate).unwrap();
                prop_assert!((value - discounted_sum(&flows, rate)).abs() <= 1e-9 * value.abs().max(1.0));
            }
        }

        #[test]
        fn prop_truncated_autocall_terminal_at_truncated_time(
            path in prop::collection::vec(1.0_f64..60.0, 1..4),
        ) {
            // Spots below every barrier: no early exit, no coupons
            let product = StructuredProduct::from(
                SimpleAutocall::new(autocall_terms(), 105.0).unwrap(),
            );
            let flows = product.cash_flows(&path).unwrap();
            prop_assert_eq!(flows.len(), 1);
            prop_assert_eq!(flows[0].time, product.observation_times()[path.len() - 1]);
            assert_relative_eq!(flows[0].amount, 1_000.0 * path[path.len() - 1] / 100.0, max_relative = 1e-12);
        }
    }
}
