//! Cash-flow product trait.
//!
//! This module provides the [`CashFlowProduct`] trait that every structured
//! product implements: a pure function from a simulated path to an ordered
//! list of undiscounted cash flows.
//!
//! # Design Philosophy
//!
//! The trait is used through static dispatch (`StructuredProduct` enum). The
//! cash-flow list is canonical; the discounted value is a derived reduction.
//!
//! # Layer Boundaries
//!
//! Products depend only on the path at evaluation time. Simulation,
//! market lookup and aggregation are handled in L3 (pricer_pricing).

use pricer_core::types::{discounted_sum, CashFlow, ObservationSchedule};

use super::error::InstrumentError;
use super::terms::ContractTerms;

/// Core trait for path-dependent structured products.
///
/// # Required Methods
///
/// - [`terms`](CashFlowProduct::terms) - Shared contract terms
/// - [`name`](CashFlowProduct::name) - Product type name
/// - [`cash_flows`](CashFlowProduct::cash_flows) - Evaluate a path
///
/// # Provided Methods
///
/// - [`discounted_value`](CashFlowProduct::discounted_value) - Time-zero value of the flows
/// - [`observation_times`](CashFlowProduct::observation_times), [`underlying`](CashFlowProduct::underlying),
///   [`notional`](CashFlowProduct::notional), [`initial_spot`](CashFlowProduct::initial_spot)
///
/// # Examples
///
/// ```
/// use pricer_core::types::{CashFlow, ObservationSchedule};
/// use pricer_models::instruments::{CashFlowProduct, ContractTerms, InstrumentError};
///
/// struct ZeroCoupon {
///     terms: ContractTerms,
/// }
///
/// impl CashFlowProduct for ZeroCoupon {
///     fn terms(&self) -> &ContractTerms {
///         &self.terms
///     }
///
///     fn name(&self) -> &'static str {
///         "ZeroCoupon"
///     }
///
///     fn cash_flows(&self, _path: &[f64]) -> Result<Vec<CashFlow>, InstrumentError> {
///         Ok(vec![CashFlow::new(self.notional(), self.terms.schedule().maturity())])
///     }
/// }
///
/// let schedule = ObservationSchedule::new(vec![2.0]).unwrap();
/// let zc = ZeroCoupon { terms: ContractTerms::new("X", schedule, 100.0, 100.0).unwrap() };
/// let pv = zc.discounted_value(&[], 0.05).unwrap();
/// assert!((pv - 100.0 * (-0.1_f64).exp()).abs() < 1e-12);
/// ```
pub trait CashFlowProduct {
    /// Shared contract terms.
    fn terms(&self) -> &ContractTerms;

    /// Human-readable product type name, used for logging and error messages.
    fn name(&self) -> &'static str;

    /// Converts a simulated path into chronologically ordered, undiscounted
    /// cash flows.
    ///
    /// At most `min(path.len(), schedule.len())` observations are processed.
    ///
    /// # Errors
    ///
    /// Products that require at least one observation return
    /// [`InstrumentError::EmptyPath`].
    fn cash_flows(&self, path: &[f64]) -> Result<Vec<CashFlow>, InstrumentError>;

    /// Sum of `amount * exp(-rate * time)` over [`cash_flows`](Self::cash_flows).
    fn discounted_value(&self, path: &[f64], rate: f64) -> Result<f64, InstrumentError> {
        Ok(discounted_sum(&self.cash_flows(path)?, rate))
    }

    /// Observation schedule.
    #[inline]
    fn schedule(&self) -> &ObservationSchedule {
        self.terms().schedule()
    }

    /// Observation times in years.
    #[inline]
    fn observation_times(&self) -> &[f64] {
        self.terms().schedule().times()
    }

    /// Underlying asset name.
    #[inline]
    fn underlying(&self) -> &str {
        self.terms().underlying()
    }

    /// Notional amount.
    #[inline]
    fn notional(&self) -> f64 {
        self.terms().notional()
    }

    /// Spot fixed at trade inception.
    #[inline]
    fn initial_spot(&self) -> f64 {
        self.terms().initial_spot()
    }

    /// Whether `flows` end before the final scheduled observation.
    fn redeemed_early(&self, flows: &[CashFlow]) -> bool {
        flows
            .last()
            .is_some_and(|flow| flow.time < self.schedule().maturity())
    }
}
