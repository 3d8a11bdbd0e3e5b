//! Cash flow type and discounting helpers.
//!
//! A product's output is an ordered list of [`CashFlow`] values. The list is
//! the canonical form; a single time-zero value is obtained by discounting
//! every flow at a continuously-compounded rate:
//!
//! ```text
//! PV = Σ amount_i × exp(-r × t_i)
//! ```

/// An undiscounted payment amount and the time (in years) at which it is paid.
///
/// # Examples
///
/// ```
/// use pricer_core::types::CashFlow;
///
/// let flow = CashFlow::new(105.0, 3.0);
/// assert_eq!(flow.amount, 105.0);
/// assert_eq!(flow.time, 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow {
    /// Undiscounted payment amount
    pub amount: f64,
    /// Payment time in years from inception
    pub time: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[inline]
    pub fn new(amount: f64, time: f64) -> Self {
        Self { amount, time }
    }

    /// Returns the value of this flow discounted to time zero at `rate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::CashFlow;
    ///
    /// let flow = CashFlow::new(100.0, 1.0);
    /// let pv = flow.present_value(0.05);
    /// assert!((pv - 100.0 * (-0.05_f64).exp()).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn present_value(&self, rate: f64) -> f64 {
        self.amount * (-rate * self.time).exp()
    }
}

/// Sums the present values of `flows` at the continuously-compounded `rate`.
///
/// Returns 0 for an empty slice.
#[inline]
pub fn discounted_sum(flows: &[CashFlow], rate: f64) -> f64 {
    flows.iter().map(|flow| flow.present_value(rate)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_value_zero_rate() {
        let flow = CashFlow::new(42.0, 5.0);
        assert_eq!(flow.present_value(0.0), 42.0);
    }

    #[test]
    fn test_present_value_at_inception() {
        let flow = CashFlow::new(42.0, 0.0);
        assert_eq!(flow.present_value(0.07), 42.0);
    }

    #[test]
    fn test_discounted_sum_multiple_flows() {
        let flows = [
            CashFlow::new(5.0, 1.0),
            CashFlow::new(5.0, 2.0),
            CashFlow::new(105.0, 3.0),
        ];
        let r = 0.02;
        let expected =
            5.0 * (-r * 1.0_f64).exp() + 5.0 * (-r * 2.0_f64).exp() + 105.0 * (-r * 3.0_f64).exp();
        assert_relative_eq!(discounted_sum(&flows, r), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_discounted_sum_empty() {
        assert_eq!(discounted_sum(&[], 0.05), 0.0);
    }

    #[test]
    fn test_negative_rate_accretes() {
        let flow = CashFlow::new(100.0, 1.0);
        assert!(flow.present_value(-0.01) > 100.0);
    }
}
