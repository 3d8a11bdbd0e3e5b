//! Geometric Brownian Motion (GBM) path simulator.
//!
//! GBM is the constant-volatility model for asset price dynamics:
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - r = risk-free rate (from the market snapshot)
//! - sigma = volatility (fixed at construction)
//! - dW = Wiener process increment
//!
//! ## Log-space formulation
//!
//! Each observation gap is bridged in a single exact step:
//! ```text
//! S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//!
//! ## Draw order
//!
//! One draw per observation whose gap exceeds [`MIN_TIME_STEP`]; none otherwise.

use pricer_core::market_data::{MarketSnapshot, Quote};
use pricer_core::traits::NormalSource;

use super::error::ModelError;
use super::simulator::{observation_gaps, PathSimulator, MIN_TIME_STEP};

/// Constant-volatility GBM simulator.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::traits::FixedNormals;
/// use pricer_models::models::{GbmModel, PathSimulator};
///
/// let market = MarketSnapshot::new(0.05);
/// let model = GbmModel::new(0.0).unwrap();
///
/// // Zero volatility: deterministic growth at the risk-free rate
/// let path = model.simulate_path(100.0, &[1.0], &market, &mut FixedNormals::zeros());
/// assert!((path[0] - 100.0 * 0.05_f64.exp()).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GbmModelFields")
)]
pub struct GbmModel {
    volatility: f64,
}

/// Unvalidated wire form of [`GbmModel`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GbmModelFields {
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<GbmModelFields> for GbmModel {
    type Error = ModelError;

    fn try_from(fields: GbmModelFields) -> Result<Self, Self::Error> {
        Self::new(fields.volatility)
    }
}

impl GbmModel {
    /// Creates a GBM simulator.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidVolatility`] if `volatility` is negative or non-finite.
    pub fn new(volatility: f64) -> Result<Self, ModelError> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ModelError::InvalidVolatility(volatility));
        }
        Ok(Self { volatility })
    }

    /// Creates a GBM simulator using the volatility of a market quote.
    pub fn from_quote(quote: &Quote) -> Result<Self, ModelError> {
        Self::new(quote.volatility)
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl PathSimulator for GbmModel {
    fn simulate_path<R: NormalSource + ?Sized>(
        &self,
        initial_spot: f64,
        times: &[f64],
        market: &MarketSnapshot,
        rng: &mut R,
    ) -> Vec<f64> {
        let rate = market.risk_free_rate();
        let sigma = self.volatility;

        let mut path = Vec::with_capacity(times.len());
        let mut spot = initial_spot;

        for dt in observation_gaps(times) {
            if dt > MIN_TIME_STEP {
                let z = rng.next_normal();
                let drift = (rate - 0.5 * sigma * sigma) * dt;
                let diffusion = sigma * dt.sqrt() * z;
                spot *= (drift + diffusion).exp();
            }
            path.push(spot);
        }

        path
    }

    fn draws_per_path(&self, times: &[f64]) -> usize {
        observation_gaps(times)
            .filter(|&dt| dt > MIN_TIME_STEP)
            .count()
    }

    fn model_name(&self) -> &'static str {
        "GBM"
    }
}
