//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported and
//! accessible via absolute paths.

/// Test that cash flow and schedule types are accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::cashflow::discounted_sum;
    use pricer_core::types::error::ScheduleError;
    use pricer_core::types::schedule::ObservationSchedule;
    use pricer_core::types::CashFlow;

    let schedule = ObservationSchedule::uniform(4, 0.5).unwrap();
    assert_eq!(schedule.times(), &[0.5, 1.0, 1.5, 2.0]);

    let err = ObservationSchedule::new(vec![]).unwrap_err();
    assert!(matches!(err, ScheduleError::Empty));

    let flows = [CashFlow::new(10.0, 0.0), CashFlow::new(20.0, 0.0)];
    assert_eq!(discounted_sum(&flows, 0.05), 30.0);
}

/// Test that market data types are accessible via absolute path.
#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::error::MarketDataError;
    use pricer_core::market_data::snapshot::{MarketSnapshot, Quote};

    let market = MarketSnapshot::new(0.01).with_quote("SPX", 4500.0, 0.18);
    assert_eq!(market.quote("SPX").unwrap(), &Quote::new(4500.0, 0.18));
    assert_eq!(market.assets().collect::<Vec<_>>(), vec!["SPX"]);

    match market.quote("NKY") {
        Err(MarketDataError::UnknownAsset { asset }) => assert_eq!(asset, "NKY"),
        other => panic!("unexpected lookup result {:?}", other),
    }
}

/// Test that the random-source trait works through a generic bound.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::random::FixedNormals;
    use pricer_core::traits::NormalSource;

    fn sum_draws<R: NormalSource + ?Sized>(rng: &mut R, n: usize) -> f64 {
        (0..n).map(|_| rng.next_normal()).sum()
    }

    let mut draws = FixedNormals::new(vec![0.5, -1.5, 2.0]);
    assert_eq!(sum_draws(&mut draws, 5), 1.0);
    assert_eq!(draws.consumed(), 5);
    assert_eq!(draws.remaining(), 0);
}
