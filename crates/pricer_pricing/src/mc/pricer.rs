//! Monte Carlo pricing engine.
//!
//! This module provides the orchestration layer for Monte Carlo pricing of
//! structured products.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Market lookup of the product's underlying (spot) and risk-free rate
//! 2. Random number generation (via [`PricerRng`])
//! 3. Path generation (via any [`PathSimulator`])
//! 4. Cash-flow evaluation (via any [`CashFlowProduct`])
//! 5. Discounting and aggregation
//!
//! # Reproducibility
//!
//! [`price`](MonteCarloPricer::price) drives every path from one generator
//! seeded from the configuration. [`price_parallel`](MonteCarloPricer::price_parallel)
//! gives each batch its own generator derived from `(seed, batch index)` and
//! combines batch statistics in batch order, so its result does not depend on
//! the number of threads. The two methods consume different draw streams and
//! therefore produce different (statistically equivalent) estimates.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::traits::NormalSource;
use pricer_core::types::discounted_sum;
use pricer_models::instruments::{CashFlowProduct, InstrumentError};
use pricer_models::models::PathSimulator;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::MonteCarloConfig;
use super::error::{ConfigError, PricingError};
use crate::rng::PricerRng;

/// Pricing result.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 98.5,
///     std_error: 0.05,
///     n_paths: 10_000,
///     early_redemption_ratio: 0.62,
/// };
///
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingResult {
    /// Present value of the product (mean discounted value).
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Fraction of paths whose last cash flow precedes the final observation.
    pub early_redemption_ratio: f64,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Running mean and variance of discounted path values (Welford).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PathStatistics {
    count: usize,
    mean: f64,
    m2: f64,
    early: usize,
}

impl PathStatistics {
    #[inline]
    fn add(&mut self, value: f64, redeemed_early: bool) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        if redeemed_early {
            self.early += 1;
        }
    }

    /// Combines two disjoint samples (Chan et al.).
    fn merge(self, other: PathStatistics) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return other;
        }
        let (na, nb) = (self.count as f64, other.count as f64);
        let n = na + nb;
        let delta = other.mean - self.mean;

        PathStatistics {
            count: self.count + other.count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
            early: self.early + other.early,
        }
    }

    fn finish(self) -> PricingResult {
        if self.count == 0 {
            return PricingResult::default();
        }
        let n = self.count as f64;
        let std_error = if self.count > 1 {
            (self.m2.max(0.0) / (n - 1.0) / n).sqrt()
        } else {
            0.0
        };

        PricingResult {
            price: self.mean,
            std_error,
            n_paths: self.count,
            early_redemption_ratio: self.early as f64 / n,
        }
    }
}

/// Monte Carlo pricing engine.
///
/// Holds only the immutable configuration; products, models and the market
/// snapshot are lent read-only to each call.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::ObservationSchedule;
/// use pricer_models::instruments::{MaxReturnCliquet, ContractTerms, StructuredProduct};
/// use pricer_models::models::{GbmModel, ModelEnum};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let market = MarketSnapshot::new(0.02).with_quote("SPX", 100.0, 0.2);
/// let schedule = ObservationSchedule::new(vec![0.5, 1.0]).unwrap();
/// let contract = ContractTerms::new("SPX", schedule, 100.0, 100.0).unwrap();
/// let product = StructuredProduct::from(MaxReturnCliquet::new(contract));
/// let model = ModelEnum::Gbm(GbmModel::new(0.2).unwrap());
///
/// let config = MonteCarloConfig::builder().n_paths(2_000).seed(7).build().unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let result = pricer.price(&product, &model, &market).unwrap();
/// assert!(result.price > 0.0);
/// assert_eq!(result.n_paths, 2_000);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    #[inline]
    fn seed(&self) -> u64 {
        self.config.seed().unwrap_or(0)
    }

    /// Prices `product` sequentially with a single generator.
    ///
    /// Paths start from the quoted spot of the product's underlying. Returns
    /// and terminal redemptions are measured against the product's
    /// `ContractTerms::initial_spot`, which need not equal the quote.
    ///
    /// # Errors
    ///
    /// - [`PricingError::MarketData`] if the underlying is not quoted
    /// - [`PricingError::Instrument`] if any path fails to evaluate
    pub fn price<P, M>(
        &self,
        product: &P,
        model: &M,
        market: &MarketSnapshot,
    ) -> Result<PricingResult, PricingError>
    where
        P: CashFlowProduct + ?Sized,
        M: PathSimulator + ?Sized,
    {
        let spot = self.initial_spot(product, market)?;
        let n_paths = self.config.n_paths();
        info!(
            product = product.name(),
            model = model.model_name(),
            n_paths,
            seed = self.seed(),
            "Starting Monte Carlo pricing"
        );

        let mut rng = PricerRng::from_seed(self.seed());
        let stats = simulate_batch(product, model, market, spot, n_paths, &mut rng)
            .inspect_err(|err| {
                warn!(product = product.name(), error = %err, "Pricing run abandoned")
            })?;

        let result = stats.finish();
        info!(
            price = result.price,
            std_error = result.std_error,
            early_redemption_ratio = result.early_redemption_ratio,
            "Monte Carlo pricing complete"
        );
        Ok(result)
    }

    /// Prices `product` in parallel batches using rayon.
    ///
    /// Paths are partitioned into batches of `batch_size`; each batch owns a
    /// generator seeded from `(seed, batch index)`. The result is
    /// deterministic for a given configuration regardless of thread count.
    ///
    /// # Errors
    ///
    /// Same as [`price`](Self::price). The first failing batch aborts the run.
    pub fn price_parallel<P, M>(
        &self,
        product: &P,
        model: &M,
        market: &MarketSnapshot,
    ) -> Result<PricingResult, PricingError>
    where
        P: CashFlowProduct + Sync + ?Sized,
        M: PathSimulator + Sync + ?Sized,
    {
        let spot = self.initial_spot(product, market)?;
        let n_paths = self.config.n_paths();
        let batch_size = self.config.batch_size();
        let n_batches = self.config.n_batches();
        let seed = self.seed();
        info!(
            product = product.name(),
            model = model.model_name(),
            n_paths,
            n_batches,
            seed,
            "Starting parallel Monte Carlo pricing"
        );

        let batches: Vec<PathStatistics> = (0..n_batches)
            .into_par_iter()
            .map(|batch| -> Result<PathStatistics, InstrumentError> {
                let start = batch * batch_size;
                let len = batch_size.min(n_paths - start);
                let mut rng = PricerRng::for_batch(seed, batch as u64);
                let stats = simulate_batch(product, model, market, spot, len, &mut rng)?;
                debug!(batch, paths = len, "Batch complete");
                Ok(stats)
            })
            .collect::<Result<Vec<_>, InstrumentError>>()
            .inspect_err(|err| {
                warn!(product = product.name(), error = %err, "Pricing run abandoned")
            })?;

        let result = batches
            .into_iter()
            .fold(PathStatistics::default(), PathStatistics::merge)
            .finish();
        info!(
            price = result.price,
            std_error = result.std_error,
            early_redemption_ratio = result.early_redemption_ratio,
            "Parallel Monte Carlo pricing complete"
        );
        Ok(result)
    }

    fn initial_spot<P>(&self, product: &P, market: &MarketSnapshot) -> Result<f64, PricingError>
    where
        P: CashFlowProduct + ?Sized,
    {
        market
            .quote(product.underlying())
            .map(|quote| quote.spot)
            .map_err(|err| {
                warn!(underlying = product.underlying(), "Underlying missing from market snapshot");
                PricingError::from(err)
            })
    }
}

/// Simulates and evaluates `n_paths` trajectories with one generator.
fn simulate_batch<P, M, R>(
    product: &P,
    model: &M,
    market: &MarketSnapshot,
    spot: f64,
    n_paths: usize,
    rng: &mut R,
) -> Result<PathStatistics, InstrumentError>
where
    P: CashFlowProduct + ?Sized,
    M: PathSimulator + ?Sized,
    R: NormalSource + ?Sized,
{
    let times = product.observation_times();
    let rate = market.risk_free_rate();
    let mut stats = PathStatistics::default();

    for _ in 0..n_paths {
        let path = model.simulate_path(spot, times, market, rng);
        let flows = product.cash_flows(&path)?;
        stats.add(discounted_sum(&flows, rate), product.redeemed_early(&flows));
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::ObservationSchedule;
    use pricer_models::instruments::{
        AutocallTerms, ContractTerms, MaxReturnCliquet, SimpleAutocall, StructuredProduct,
    };
    use pricer_models::models::{GbmModel, HestonModel, HestonParams, ModelEnum};

    fn market() -> MarketSnapshot {
        MarketSnapshot::new(0.05).with_quote("SX5E", 100.0, 0.2)
    }

    fn contract(underlying: &str) -> ContractTerms {
        let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
        ContractTerms::new(underlying, schedule, 100.0, 100.0).unwrap()
    }

    fn autocall(call_barrier: f64) -> StructuredProduct {
        let terms = AutocallTerms::new(contract("SX5E"), 0.05, 80.0).unwrap();
        SimpleAutocall::new(terms, call_barrier).unwrap().into()
    }

    fn pricer(n_paths: usize, seed: u64) -> MonteCarloPricer {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .seed(seed)
            .batch_size(250)
            .build()
            .unwrap();
        MonteCarloPricer::new(config).unwrap()
    }

    fn gbm(vol: f64) -> ModelEnum {
        ModelEnum::Gbm(GbmModel::new(vol).unwrap())
    }

    #[test]
    fn test_statistics_finish() {
        let mut stats = PathStatistics::default();
        for (value, early) in [(1.0, true), (2.0, false), (3.0, false), (4.0, true)] {
            stats.add(value, early);
        }
        let result = stats.finish();
        assert_relative_eq!(result.price, 2.5, epsilon = 1e-12);
        // Sample variance 5/3, standard error sqrt(5/12)
        assert_relative_eq!(result.std_error, (5.0_f64 / 12.0).sqrt(), epsilon = 1e-12);
        assert_eq!(result.n_paths, 4);
        assert_eq!(result.early_redemption_ratio, 0.5);
    }

    #[test]
    fn test_statistics_merge_matches_single_pass() {
        let values = [1.5, -0.5, 3.25, 8.0, 0.0];
        let mut single = PathStatistics::default();
        let mut left = PathStatistics::default();
        let mut right = PathStatistics::default();
        for (i, &v) in values.iter().enumerate() {
            single.add(v, i % 2 == 0);
            if i < 2 {
                left.add(v, i % 2 == 0);
            } else {
                right.add(v, i % 2 == 0);
            }
        }
        let merged = left.merge(right).finish();
        let direct = single.finish();
        assert_relative_eq!(merged.price, direct.price, epsilon = 1e-12);
        assert_relative_eq!(merged.std_error, direct.std_error, epsilon = 1e-12);
        assert_eq!(merged.early_redemption_ratio, direct.early_redemption_ratio);
    }

    #[test]
    fn test_single_path_has_zero_std_error() {
        let mut stats = PathStatistics::default();
        stats.add(42.0, false);
        assert_eq!(stats.finish().std_error, 0.0);
    }

    #[test]
    fn test_deterministic_model_immediate_call() {
        // Zero volatility: spot at t=1 is 100*e^0.05 >= 100, called at once
        let result = pricer(100, 1).price(&autocall(100.0), &gbm(0.0), &market()).unwrap();

        assert_relative_eq!(result.price, 105.0 * (-0.05_f64).exp(), max_relative = 1e-12);
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.early_redemption_ratio, 1.0);
    }

    #[test]
    fn test_deterministic_model_max_return() {
        let product = StructuredProduct::from(MaxReturnCliquet::new(contract("SX5E")));
        let result = pricer(10, 1).price(&product, &gbm(0.0), &market()).unwrap();

        let expected = 100.0 * (0.15_f64.exp() - 1.0) * (-0.15_f64).exp();
        assert_relative_eq!(result.price, expected, max_relative = 1e-12);
        assert_eq!(result.early_redemption_ratio, 0.0);
    }

    #[test]
    fn test_unknown_underlying() {
        let terms = AutocallTerms::new(contract("NKY"), 0.05, 80.0).unwrap();
        let product = StructuredProduct::from(SimpleAutocall::new(terms, 100.0).unwrap());

        let err = pricer(10, 1).price(&product, &gbm(0.2), &market()).unwrap_err();
        assert!(matches!(err, PricingError::MarketData(_)));

        let err = pricer(10, 1)
            .price_parallel(&product, &gbm(0.2), &market())
            .unwrap_err();
        assert!(matches!(err, PricingError::MarketData(_)));
    }

    #[test]
    fn test_same_seed_reproducible() {
        let a = pricer(2_000, 11).price(&autocall(105.0), &gbm(0.25), &market()).unwrap();
        let b = pricer(2_000, 11).price(&autocall(105.0), &gbm(0.25), &market()).unwrap();
        assert_eq!(a, b);

        let c = pricer(2_000, 12).price(&autocall(105.0), &gbm(0.25), &market()).unwrap();
        assert_ne!(a.price, c.price);
    }

    #[test]
    fn test_parallel_independent_of_thread_count() {
        let product = autocall(105.0);
        let model = gbm(0.25);
        let market = market();
        let pricer = pricer(3_001, 99);

        let run = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| pricer.price_parallel(&product, &model, &market).unwrap())
        };

        let single = run(1);
        let multi = run(4);
        assert_eq!(single, multi);
        assert_eq!(single.n_paths, 3_001);
    }

    #[test]
    fn test_parallel_agrees_with_sequential_statistically() {
        let product = autocall(105.0);
        let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap();
        let model = ModelEnum::Heston(HestonModel::new(params).with_max_substep(0.05).unwrap());
        let pricer = pricer(4_000, 2024);

        let seq = pricer.price(&product, &model, &market()).unwrap();
        let par = pricer.price_parallel(&product, &model, &market()).unwrap();

        let tolerance = 5.0 * (seq.std_error.powi(2) + par.std_error.powi(2)).sqrt();
        assert!((seq.price - par.price).abs() < tolerance);
        assert!(seq.early_redemption_ratio > 0.0 && seq.early_redemption_ratio < 1.0);
    }

    #[test]
    fn test_paths_start_from_quote_but_pay_against_contract_spot() {
        // Quote at 120, contract struck at 100
        let market = MarketSnapshot::new(0.05).with_quote("SX5E", 120.0, 0.0);
        let product = StructuredProduct::from(MaxReturnCliquet::new(contract("SX5E")));

        let result = pricer(8, 1).price(&product, &gbm(0.0), &market).unwrap();
        let expected = 100.0 * (1.2 * 0.15_f64.exp() - 1.0) * (-0.15_f64).exp();
        assert_relative_eq!(result.price, expected, max_relative = 1e-10);
    }
}
