//! Contract terms shared by every structured product.

use pricer_core::types::ObservationSchedule;

use super::error::{require_finite, InstrumentError};

/// Underlying, observation schedule, initial spot and notional.
///
/// Immutable after construction; products built on the same terms can be
/// evaluated concurrently.
///
/// # Examples
///
/// ```
/// use pricer_core::types::ObservationSchedule;
/// use pricer_models::instruments::ContractTerms;
///
/// let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
/// let terms = ContractTerms::new("SX5E", schedule, 100.0, 1_000.0).unwrap();
/// assert_eq!(terms.underlying(), "SX5E");
/// assert_eq!(terms.schedule().maturity(), 3.0);
///
/// assert!(ContractTerms::new("SX5E", terms.schedule().clone(), 100.0, 0.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContractTerms {
    underlying: String,
    schedule: ObservationSchedule,
    initial_spot: f64,
    notional: f64,
}

impl ContractTerms {
    /// Creates validated contract terms.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::InvalidParameter`] if `notional` is not finite and
    /// positive, or `initial_spot` is not finite. A non-positive initial spot is
    /// accepted; payoffs fall back to fixed amounts in that case.
    pub fn new(
        underlying: impl Into<String>,
        schedule: ObservationSchedule,
        initial_spot: f64,
        notional: f64,
    ) -> Result<Self, InstrumentError> {
        if !notional.is_finite() || notional <= 0.0 {
            return Err(InstrumentError::InvalidParameter {
                name: "notional",
                value: notional,
            });
        }
        require_finite("initial_spot", initial_spot)?;

        Ok(Self {
            underlying: underlying.into(),
            schedule,
            initial_spot,
            notional,
        })
    }

    /// Underlying asset name, as quoted in the market snapshot.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Observation schedule.
    #[inline]
    pub fn schedule(&self) -> &ObservationSchedule {
        &self.schedule
    }

    /// Spot fixed at trade inception.
    #[inline]
    pub fn initial_spot(&self) -> f64 {
        self.initial_spot
    }

    /// Notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }
}
