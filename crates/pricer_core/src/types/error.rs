//! Error types for structured error handling.
//!
//! This module provides:
//! - `ScheduleError`: Errors from observation schedule construction

use thiserror::Error;

/// Observation schedule construction errors.
///
/// # Variants
/// - `Empty`: No observation times supplied
/// - `InvalidTime`: A time is negative, NaN or infinite
/// - `Decreasing`: A time is earlier than its predecessor
///
/// # Examples
/// ```
/// use pricer_core::types::ScheduleError;
///
/// let err = ScheduleError::Decreasing { index: 2, previous: 3.0, value: 1.0 };
/// assert_eq!(
///     format!("{}", err),
///     "Observation time at index 2 (1) precedes previous time 3"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// No observation times supplied.
    #[error("Observation schedule is empty")]
    Empty,

    /// Negative or non-finite observation time.
    #[error("Invalid observation time at index {index}: {value}")]
    InvalidTime {
        /// Position in the schedule
        index: usize,
        /// The rejected value
        value: f64,
    },

    /// Observation time earlier than its predecessor.
    #[error("Observation time at index {index} ({value}) precedes previous time {previous}")]
    Decreasing {
        /// Position in the schedule
        index: usize,
        /// The preceding time
        previous: f64,
        /// The rejected value
        value: f64,
    },
}
