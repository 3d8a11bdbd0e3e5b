//! Pricing run configuration.
//!
//! A pricing run is described by a TOML document with four sections:
//!
//! ```toml
//! [market]
//! risk_free_rate = 0.03
//!
//! [market.quotes.SX5E]
//! spot = 100.0
//! volatility = 0.2
//!
//! [model]
//! type = "heston"
//! v0 = 0.04
//! kappa = 1.5
//! theta = 0.04
//! xi = 0.3
//! rho = -0.7
//!
//! [product]
//! type = "phoenix"
//! underlying = "SX5E"
//! observation_times = [1.0, 2.0, 3.0]
//! initial_spot = 100.0
//! notional = 1000.0
//! coupon_rate = 0.05
//! protection_barrier = 70.0
//! call_barrier = 100.0
//! coupon_barrier = 80.0
//!
//! [monte_carlo]
//! n_paths = 100000
//! seed = 42
//! parallel = true
//! ```
//!
//! [`PricingRunConfig::build`] validates every section and produces a
//! [`PricingRun`] holding the runtime objects.

use std::collections::BTreeMap;
use std::path::Path;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::ObservationSchedule;
use pricer_models::instruments::{
    AirbagAutocall, AutocallTerms, CappedCouponCliquet, CashFlowProduct, ContractTerms,
    MaxReturnCliquet, MemoryPhoenixAutocall, PhoenixAutocall, SimpleAutocall, StepDownAutocall,
    StructuredProduct,
};
use pricer_models::models::{
    GbmModel, HestonModel, HestonParams, ModelEnum, ModelError, PathSimulator,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::mc::{ConfigError, MonteCarloConfig, MonteCarloPricer, PricingError, PricingResult};

/// Spot and volatility of one asset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QuoteSection {
    /// Current spot.
    pub spot: f64,
    /// Constant volatility.
    pub volatility: f64,
}

/// `[market]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarketSection {
    /// Continuously compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Quotes keyed by asset identifier.
    #[serde(default)]
    pub quotes: BTreeMap<String, QuoteSection>,
}

/// `[model]` section, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSection {
    /// Constant volatility model.
    Gbm {
        /// Volatility; taken from the underlying's quote when omitted.
        #[serde(default)]
        volatility: Option<f64>,
    },
    /// Heston stochastic volatility model.
    Heston {
        /// Initial variance.
        v0: f64,
        /// Mean reversion speed.
        kappa: f64,
        /// Long-run variance.
        theta: f64,
        /// Volatility of variance.
        xi: f64,
        /// Spot/variance correlation.
        rho: f64,
        /// Internal integration increment override.
        #[serde(default)]
        max_substep: Option<f64>,
    },
}

/// Variant-specific product terms, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayoffSection {
    /// [`SimpleAutocall`].
    Simple {
        /// Coupon rate per period.
        coupon_rate: f64,
        /// Terminal protection level.
        protection_barrier: f64,
        /// Autocall level.
        call_barrier: f64,
    },
    /// [`StepDownAutocall`].
    StepDown {
        /// Coupon rate per period.
        coupon_rate: f64,
        /// Terminal protection level.
        protection_barrier: f64,
        /// Autocall level per observation.
        call_barriers: Vec<f64>,
    },
    /// [`AirbagAutocall`].
    Airbag {
        /// Coupon rate per period.
        coupon_rate: f64,
        /// Terminal protection level.
        protection_barrier: f64,
        /// Autocall level.
        call_barrier: f64,
        /// Minimum terminal redemption as a fraction of notional.
        airbag_floor: f64,
    },
    /// [`PhoenixAutocall`].
    Phoenix {
        /// Coupon rate per period.
        coupon_rate: f64,
        /// Terminal protection level.
        protection_barrier: f64,
        /// Autocall level.
        call_barrier: f64,
        /// Coupon payment level.
        coupon_barrier: f64,
    },
    /// [`MemoryPhoenixAutocall`].
    MemoryPhoenix {
        /// Coupon rate per period.
        coupon_rate: f64,
        /// Terminal protection level.
        protection_barrier: f64,
        /// Autocall level.
        call_barrier: f64,
        /// Coupon release level.
        coupon_barrier: f64,
    },
    /// [`CappedCouponCliquet`].
    CappedCoupon {
        /// Multiplier on each period return.
        participation: f64,
        /// Per-period cap.
        cap: f64,
    },
    /// [`MaxReturnCliquet`].
    MaxReturn,
}

/// `[product]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductSection {
    /// Underlying asset identifier.
    pub underlying: String,
    /// Observation times in years.
    pub observation_times: Vec<f64>,
    /// Reference spot at inception.
    pub initial_spot: f64,
    /// Notional amount.
    pub notional: f64,
    /// Variant-specific terms.
    #[serde(flatten)]
    pub payoff: PayoffSection,
}

/// `[monte_carlo]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonteCarloSection {
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed; 0 when omitted.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Paths per parallel batch.
    #[serde(default)]
    pub batch_size: Option<usize>,
    /// Use the rayon-parallel driver.
    #[serde(default)]
    pub parallel: bool,
}

/// Complete description of a pricing run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PricingRunConfig {
    /// Market snapshot.
    pub market: MarketSection,
    /// Path simulator.
    pub model: ModelSection,
    /// Structured product.
    pub product: ProductSection,
    /// Simulation settings.
    pub monte_carlo: MonteCarloSection,
}

/// Runtime objects built from a [`PricingRunConfig`].
#[derive(Clone, Debug)]
pub struct PricingRun {
    /// Market snapshot.
    pub market: MarketSnapshot,
    /// Path simulator.
    pub model: ModelEnum,
    /// Structured product.
    pub product: StructuredProduct,
    /// Configured pricer.
    pub pricer: MonteCarloPricer,
    /// Whether [`run`](Self::run) uses the parallel driver.
    pub parallel: bool,
}

impl PricingRun {
    /// Prices the product with the configured driver.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingError`] from the driver.
    pub fn run(&self) -> Result<PricingResult, PricingError> {
        if self.parallel {
            self.pricer
                .price_parallel(&self.product, &self.model, &self.market)
        } else {
            self.pricer.price(&self.product, &self.model, &self.market)
        }
    }
}

impl PricingRunConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML or missing fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricingRunConfig = toml::from_str(content)?;
        debug!(
            underlying = %config.product.underlying,
            n_paths = config.monte_carlo.n_paths,
            "Parsed pricing run configuration"
        );
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FileError`] if the file cannot be read
    /// - [`ConfigError::Parse`] on malformed content
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        info!(path = %path.display(), "Loading pricing run configuration");
        Self::from_toml_str(&content)
    }

    /// Validates the market and simulation sections.
    ///
    /// Model and product parameters are validated by their constructors in
    /// [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] for a non-finite rate or quote, and
    /// the [`MonteCarloConfig`] errors for the simulation section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.market.risk_free_rate.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "market.risk_free_rate",
                value: self.market.risk_free_rate.to_string(),
            });
        }
        for (asset, quote) in &self.market.quotes {
            if !quote.spot.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: "market.quotes.spot",
                    value: format!("{asset}: {}", quote.spot),
                });
            }
            if !quote.volatility.is_finite() || quote.volatility < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "market.quotes.volatility",
                    value: format!("{asset}: {}", quote.volatility),
                });
            }
        }
        self.monte_carlo_config()?;
        Ok(())
    }

    /// Validates the configuration and builds the runtime objects.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised by validation or by the model, schedule
    /// and product constructors.
    pub fn build(&self) -> Result<PricingRun, ConfigError> {
        self.validate()?;

        let market = self.market_snapshot();
        let model = self.model(&market)?;
        let product = self.product()?;
        let pricer = MonteCarloPricer::new(self.monte_carlo_config()?)?;

        info!(
            product = product.name(),
            underlying = %self.product.underlying,
            model = model.model_name(),
            parallel = self.monte_carlo.parallel,
            "Built pricing run"
        );

        Ok(PricingRun {
            market,
            model,
            product,
            pricer,
            parallel: self.monte_carlo.parallel,
        })
    }

    fn market_snapshot(&self) -> MarketSnapshot {
        self.market.quotes.iter().fold(
            MarketSnapshot::new(self.market.risk_free_rate),
            |market, (asset, quote)| market.with_quote(asset.as_str(), quote.spot, quote.volatility),
        )
    }

    fn model(&self, market: &MarketSnapshot) -> Result<ModelEnum, ConfigError> {
        let model = match self.model {
            ModelSection::Gbm {
                volatility: Some(volatility),
            } => GbmModel::new(volatility)?.into(),
            ModelSection::Gbm { volatility: None } => {
                GbmModel::from_quote(market.quote(&self.product.underlying)?)?.into()
            }
            ModelSection::Heston {
                v0,
                kappa,
                theta,
                xi,
                rho,
                max_substep,
            } => {
                let params = HestonParams::new(v0, kappa, theta, xi, rho)
                    .map_err(ModelError::from)?;
                let mut model = HestonModel::new(params);
                if let Some(dt) = max_substep {
                    model = model
                        .with_max_substep(dt)
                        .map_err(ModelError::from)?;
                }
                model.into()
            }
        };
        Ok(model)
    }

    fn product(&self) -> Result<StructuredProduct, ConfigError> {
        let section = &self.product;
        let schedule = ObservationSchedule::new(section.observation_times.clone())?;
        let contract = ContractTerms::new(
            section.underlying.as_str(),
            schedule,
            section.initial_spot,
            section.notional,
        )?;

        let product = match section.payoff {
            PayoffSection::Simple {
                coupon_rate,
                protection_barrier,
                call_barrier,
            } => {
                let terms = AutocallTerms::new(contract, coupon_rate, protection_barrier)?;
                SimpleAutocall::new(terms, call_barrier)?.into()
            }
            PayoffSection::StepDown {
                coupon_rate,
                protection_barrier,
                ref call_barriers,
            } => {
                let terms = AutocallTerms::new(contract, coupon_rate, protection_barrier)?;
                StepDownAutocall::new(terms, call_barriers.clone())?.into()
            }
            PayoffSection::Airbag {
                coupon_rate,
                protection_barrier,
                call_barrier,
                airbag_floor,
            } => {
                let terms = AutocallTerms::new(contract, coupon_rate, protection_barrier)?;
                AirbagAutocall::new(terms, call_barrier, airbag_floor)?.into()
            }
            PayoffSection::Phoenix {
                coupon_rate,
                protection_barrier,
                call_barrier,
                coupon_barrier,
            } => {
                let terms = AutocallTerms::new(contract, coupon_rate, protection_barrier)?;
                PhoenixAutocall::new(terms, call_barrier, coupon_barrier)?.into()
            }
            PayoffSection::MemoryPhoenix {
                coupon_rate,
                protection_barrier,
                call_barrier,
                coupon_barrier,
            } => {
                let terms = AutocallTerms::new(contract, coupon_rate, protection_barrier)?;
                MemoryPhoenixAutocall::new(terms, call_barrier, coupon_barrier)?.into()
            }
            PayoffSection::CappedCoupon { participation, cap } => {
                CappedCouponCliquet::new(contract, participation, cap)?.into()
            }
            PayoffSection::MaxReturn => MaxReturnCliquet::new(contract).into(),
        };
        Ok(product)
    }

    fn monte_carlo_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        let section = &self.monte_carlo;
        let mut builder = MonteCarloConfig::builder().n_paths(section.n_paths);
        if let Some(seed) = section.seed {
            builder = builder.seed(seed);
        }
        if let Some(batch_size) = section.batch_size {
            builder = builder.batch_size(batch_size);
        }
        builder.build()
    }
}
