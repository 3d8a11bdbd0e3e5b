//! Instrument error types.
//!
//! This module provides structured error handling for product
//! construction and cash-flow evaluation.

use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidParameter`: A construction parameter failed validation
/// - `EmptyBarrierSchedule`: A step-down product was given no call barriers
/// - `EmptyPath`: A product that needs at least one observation received none
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidParameter { name: "notional", value: -100.0 };
/// assert_eq!(format!("{}", err), "Invalid parameter: notional = -100");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid construction parameter.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Step-down barrier vector is empty.
    #[error("Step-down product requires at least one call barrier")]
    EmptyBarrierSchedule,

    /// Evaluation was attempted on an empty path.
    #[error("{product} path is empty")]
    EmptyPath {
        /// Product name
        product: &'static str,
    },
}

/// Rejects non-finite parameter values.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, InstrumentError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InstrumentError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_display() {
        let err = InstrumentError::EmptyPath {
            product: "MaxReturnCliquet",
        };
        assert_eq!(format!("{}", err), "MaxReturnCliquet path is empty");
    }

    #[test]
    fn test_empty_barrier_schedule_display() {
        let msg = format!("{}", InstrumentError::EmptyBarrierSchedule);
        assert!(msg.contains("call barrier"));
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("cap", 0.05), Ok(0.05));
        assert_eq!(
            require_finite("cap", f64::INFINITY),
            Err(InstrumentError::InvalidParameter {
                name: "cap",
                value: f64::INFINITY
            })
        );
        assert!(require_finite("cap", f64::NAN).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = InstrumentError::EmptyBarrierSchedule;
        let _: &dyn std::error::Error = &err;
    }
}
