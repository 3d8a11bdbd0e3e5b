//! Market snapshot at time zero.

use std::collections::HashMap;

use super::error::MarketDataError;

/// Per-asset quote: initial spot and annualised volatility.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    /// Initial spot price
    pub spot: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl Quote {
    /// Creates a new quote.
    #[inline]
    pub fn new(spot: f64, volatility: f64) -> Self {
        Self { spot, volatility }
    }
}

/// Market snapshot shared by every simulator in a pricing run.
///
/// One rate applies to all assets. Mutators exist for construction only;
/// the snapshot must not be changed while simulations are in flight.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
///
/// let mut market = MarketSnapshot::new(0.03);
/// market.set_quote("SX5E", 100.0, 0.2);
/// market.set_rate(0.025);
///
/// assert_eq!(market.risk_free_rate(), 0.025);
/// assert_eq!(market.quote("SX5E").unwrap().spot, 100.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    risk_free_rate: f64,
    quotes: HashMap<String, Quote>,
}

impl MarketSnapshot {
    /// Creates an empty snapshot with the given risk-free rate.
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            quotes: HashMap::new(),
        }
    }

    /// Builder-style variant of [`set_quote`](Self::set_quote).
    pub fn with_quote(mut self, asset: impl Into<String>, spot: f64, volatility: f64) -> Self {
        self.set_quote(asset, spot, volatility);
        self
    }

    /// Returns the continuously-compounded risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Replaces the risk-free rate.
    pub fn set_rate(&mut self, rate: f64) {
        self.risk_free_rate = rate;
    }

    /// Stores or replaces the quote for `asset`.
    pub fn set_quote(&mut self, asset: impl Into<String>, spot: f64, volatility: f64) {
        self.quotes
            .insert(asset.into(), Quote::new(spot, volatility));
    }

    /// Looks up the quote for `asset`.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::UnknownAsset`] if no quote was stored for `asset`.
    pub fn quote(&self, asset: &str) -> Result<&Quote, MarketDataError> {
        self.quotes
            .get(asset)
            .ok_or_else(|| MarketDataError::UnknownAsset {
                asset: asset.to_string(),
            })
    }

    /// Returns `true` if a quote is stored for `asset`.
    #[inline]
    pub fn contains(&self, asset: &str) -> bool {
        self.quotes.contains_key(asset)
    }

    /// Iterates over the quoted asset identifiers (unordered).
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }

    /// Discount factor `exp(-r t)` at the snapshot rate.
    #[inline]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.risk_free_rate * t).exp()
    }
}
