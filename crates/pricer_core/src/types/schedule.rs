//! Observation schedules.
//!
//! An [`ObservationSchedule`] is the ordered list of times (years from
//! inception) at which the underlying is observed. Simulators sample one spot
//! per time and products evaluate their rules at the same indices.
//!
//! Equal consecutive times are allowed; simulators carry the spot forward
//! across them without consuming random draws.

use super::error::ScheduleError;

/// Validated, immutable observation schedule.
///
/// # Invariants
///
/// - At least one time
/// - Every time is finite and non-negative
/// - Times are non-decreasing
///
/// # Examples
///
/// ```
/// use pricer_core::types::ObservationSchedule;
///
/// let schedule = ObservationSchedule::new(vec![0.5, 1.0, 1.5, 2.0]).unwrap();
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.maturity(), 2.0);
///
/// assert!(ObservationSchedule::new(vec![1.0, 0.5]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct ObservationSchedule {
    times: Vec<f64>,
}

impl ObservationSchedule {
    /// Creates a schedule, validating ordering and domain.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::Empty`] if `times` is empty
    /// - [`ScheduleError::InvalidTime`] for a negative or non-finite time
    /// - [`ScheduleError::Decreasing`] if a time precedes its predecessor
    pub fn new(times: Vec<f64>) -> Result<Self, ScheduleError> {
        if times.is_empty() {
            return Err(ScheduleError::Empty);
        }
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::InvalidTime { index, value });
            }
            if index > 0 && value < times[index - 1] {
                return Err(ScheduleError::Decreasing {
                    index,
                    previous: times[index - 1],
                    value,
                });
            }
        }
        Ok(Self { times })
    }

    /// Builds an evenly spaced schedule `[step, 2·step, ..., n·step]`.
    ///
    /// Convenient for annual or quarterly observation grids.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::ObservationSchedule;
    ///
    /// let quarterly = ObservationSchedule::uniform(8, 0.25).unwrap();
    /// assert_eq!(quarterly.times()[0], 0.25);
    /// assert_eq!(quarterly.maturity(), 2.0);
    /// ```
    pub fn uniform(n: usize, step: f64) -> Result<Self, ScheduleError> {
        Self::new((1..=n).map(|i| i as f64 * step).collect())
    }

    /// Returns the observation times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the number of observation times.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a validated schedule holds at least one time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the last observation time.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

impl TryFrom<Vec<f64>> for ObservationSchedule {
    type Error = ScheduleError;

    fn try_from(times: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(times)
    }
}

impl From<ObservationSchedule> for Vec<f64> {
    fn from(schedule: ObservationSchedule) -> Self {
        schedule.times
    }
}

impl AsRef<[f64]> for ObservationSchedule {
    fn as_ref(&self) -> &[f64] {
        &self.times
    }
}
