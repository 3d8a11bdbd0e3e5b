//! Model construction errors.

use thiserror::Error;

use super::heston::HestonError;

/// Errors raised while constructing a path simulator.
///
/// # Examples
///
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::InvalidVolatility(-0.2);
/// assert_eq!(format!("{}", err), "Invalid volatility: -0.2 (must be finite and non-negative)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Negative or non-finite volatility.
    #[error("Invalid volatility: {0} (must be finite and non-negative)")]
    InvalidVolatility(f64),

    /// Heston parameter validation failure.
    #[error("Heston model error: {0}")]
    Heston(#[from] HestonError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_heston_error() {
        let err: ModelError = HestonError::InvalidRho(1.5).into();
        match err {
            ModelError::Heston(HestonError::InvalidRho(rho)) => assert_eq!(rho, 1.5),
            _ => panic!("Expected Heston variant"),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ModelError::InvalidVolatility(f64::NAN);
        let _: &dyn std::error::Error = &err;
    }
}
