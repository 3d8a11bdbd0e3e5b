//! L1/L2 integration tests for pricer_pricing.
//!
//! These tests wire the layers together without the Monte Carlo driver:
//! - L1 (pricer_core): market snapshot, schedules, replayable random source
//! - L2 (pricer_models): path simulators and structured products

use approx::assert_relative_eq;
use pricer_core::market_data::MarketSnapshot;
use pricer_core::traits::FixedNormals;
use pricer_core::types::{discounted_sum, CashFlow, ObservationSchedule};
use pricer_models::instruments::{
    AutocallTerms, CappedCouponCliquet, CashFlowProduct, ContractTerms, MaxReturnCliquet,
    MemoryPhoenixAutocall, SimpleAutocall, StructuredProduct,
};
use pricer_models::models::{GbmModel, HestonModel, HestonParams, ModelEnum, PathSimulator};

fn market() -> MarketSnapshot {
    MarketSnapshot::new(0.05).with_quote("SX5E", 100.0, 0.2)
}

fn contract(underlying: &str) -> ContractTerms {
    let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
    ContractTerms::new(underlying, schedule, 100.0, 100.0).unwrap()
}

fn autocall_terms() -> AutocallTerms {
    AutocallTerms::new(contract("SX5E"), 0.05, 80.0).unwrap()
}

// =============================================================================
// Simulators
// =============================================================================

#[test]
fn test_zero_volatility_gbm_is_deterministic() {
    let model = ModelEnum::Gbm(GbmModel::new(0.0).unwrap());
    let times = [0.5, 1.0, 1.0, 2.5];

    let mut draws = FixedNormals::new(vec![3.0, -2.0, 0.7, 1.1]);
    let path = model.simulate_path(100.0, &times, &market(), &mut draws);

    for (spot, t) in path.iter().zip(times) {
        assert_relative_eq!(*spot, 100.0 * (0.05 * t).exp(), max_relative = 1e-12);
    }
}

#[test]
fn test_heston_without_vol_of_vol_matches_gbm() {
    let theta = 0.04;
    let heston = HestonModel::new(HestonParams::new(theta, 2.0, theta, 0.0, 0.0).unwrap())
        .with_max_substep(1.0)
        .unwrap();
    let gbm = GbmModel::new(theta.sqrt()).unwrap();
    let times = [0.5, 1.0];

    // One sub-step per gap; the variance shock (second draw) is ignored
    let mut heston_draws = FixedNormals::new(vec![0.4, 5.0, -1.2, -5.0]);
    let mut gbm_draws = FixedNormals::new(vec![0.4, -1.2]);

    let heston_path = heston.simulate_path(100.0, &times, &market(), &mut heston_draws);
    let gbm_path = gbm.simulate_path(100.0, &times, &market(), &mut gbm_draws);

    for (h, g) in heston_path.iter().zip(&gbm_path) {
        assert_relative_eq!(*h, *g, max_relative = 1e-12);
    }
    assert_eq!(heston_draws.consumed(), heston.draws_per_path(&times));
}

// =============================================================================
// Products on simulated paths
// =============================================================================

#[test]
fn test_simple_autocall_reference_paths() {
    let product = StructuredProduct::from(SimpleAutocall::new(autocall_terms(), 100.0).unwrap());

    assert_eq!(
        product.cash_flows(&[90.0, 95.0, 101.0]).unwrap(),
        vec![CashFlow::new(105.0, 3.0)]
    );
    assert_eq!(
        product.cash_flows(&[90.0, 85.0, 70.0]).unwrap(),
        vec![CashFlow::new(70.0, 3.0)]
    );
}

#[test]
fn test_memory_phoenix_reference_path() {
    let product = MemoryPhoenixAutocall::new(autocall_terms(), 100.0, 90.0).unwrap();
    let flows = product.cash_flows(&[80.0, 95.0, 101.0]).unwrap();

    assert_eq!(
        flows,
        vec![
            CashFlow::new(10.0, 2.0),
            CashFlow::new(5.0, 3.0),
            CashFlow::new(100.0, 3.0),
        ]
    );
}

#[test]
fn test_cliquet_reference_paths() {
    let max_return = MaxReturnCliquet::new(contract("SX5E"));
    assert_eq!(
        max_return.cash_flows(&[100.0, 130.0, 90.0]).unwrap(),
        vec![CashFlow::new(30.0, 3.0)]
    );

    let capped = CappedCouponCliquet::new(contract("SX5E"), 1.0, 0.05).unwrap();
    let flows = capped.cash_flows(&[110.0, 108.0, 130.0]).unwrap();
    assert_eq!(flows.len(), 1);
    assert_relative_eq!(flows[0].amount, 110.0, max_relative = 1e-12);
    assert_eq!(flows[0].time, 3.0);
}

#[test]
fn test_simulated_path_feeds_product() {
    let product = StructuredProduct::from(SimpleAutocall::new(autocall_terms(), 120.0).unwrap());
    let model = ModelEnum::Gbm(GbmModel::new(0.0).unwrap());
    let market = market();

    let path = model.simulate_path(
        100.0,
        product.observation_times(),
        &market,
        &mut FixedNormals::zeros(),
    );
    let flows = product.cash_flows(&path).unwrap();

    // Spot at t=3 is 100*e^0.15 < 120: held to maturity above protection
    assert_eq!(flows, vec![CashFlow::new(100.0, 3.0)]);
    assert!(!product.redeemed_early(&flows));
    assert_relative_eq!(
        product.discounted_value(&path, 0.05).unwrap(),
        discounted_sum(&flows, 0.05),
        max_relative = 1e-12
    );
}

#[test]
fn test_unknown_underlying_lookup() {
    let product = MaxReturnCliquet::new(contract("NKY"));
    let err = market().quote(product.underlying()).unwrap_err();
    assert_eq!(err.to_string(), "Underlying not found: NKY");
}

// =============================================================================
// Deserialised models
// =============================================================================

#[test]
fn test_deserialised_models_are_validated() {
    let gbm: ModelEnum = toml::from_str("type = \"gbm\"\nvolatility = 0.25\n").unwrap();
    assert_eq!(gbm, ModelEnum::Gbm(GbmModel::new(0.25).unwrap()));

    let err = toml::from_str::<ModelEnum>("type = \"gbm\"\nvolatility = -0.5\n").unwrap_err();
    assert!(err.to_string().contains("-0.5"));

    let heston = r#"
        type = "heston"
        params = { v0 = 0.04, kappa = 1.5, theta = 0.04, xi = 0.3, rho = -0.7 }
    "#;
    let model: ModelEnum = toml::from_str(heston).unwrap();
    let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap();
    assert_eq!(model, ModelEnum::Heston(HestonModel::new(params)));

    let bad_rho = heston.replace("rho = -0.7", "rho = 3.0");
    assert!(toml::from_str::<ModelEnum>(&bad_rho).is_err());
    let err = toml::from_str::<HestonParams>(
        "v0 = 0.04\nkappa = 1.5\ntheta = 0.04\nxi = 0.3\nrho = 3.0\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("相関係数"));

    let bad_substep = format!("{heston}max_substep = 0.0\n");
    assert!(toml::from_str::<ModelEnum>(&bad_substep).is_err());
}
