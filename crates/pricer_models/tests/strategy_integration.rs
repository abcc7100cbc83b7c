//! Integration tests for strategies, spot profiles and surfaces.

use approx::assert_relative_eq;
use pricer_core::types::{BarrierType, OptionType, Position};
use pricer_models::greeks::{calculate, BumpConfig, GreekMetric, Greeks};
use pricer_models::instruments::OptionParams;
use pricer_models::strategy::{
    sensitivity_surface, spot_profile, Leg, MarketEnv, MarketVariable, SpotGrid, Strategy,
    StructuredProduct, SURFACE_RESOLUTION,
};

#[test]
fn test_preset_greeks_are_leg_sums() {
    let market = MarketEnv::default();
    let config = BumpConfig::default();

    for preset in StructuredProduct::ALL {
        let strategy = preset.strategy(100.0);
        let expected: Greeks = strategy
            .legs
            .iter()
            .map(|leg| calculate(105.0, &leg.params(&market)))
            .sum();
        let actual = strategy.greeks_at(105.0, &market, &config);
        for ((metric, e), (_, a)) in expected.entries().zip(actual.entries()) {
            assert!((a - e).abs() < 1e-12, "{} {}: {} vs {}", preset, metric, a, e);
        }
    }
}

#[test]
fn test_straddle_is_call_plus_put() {
    let market = MarketEnv::default();
    let greeks = StructuredProduct::Straddle
        .strategy(100.0)
        .greeks_at(100.0, &market, &BumpConfig::default());

    let call = calculate(100.0, &OptionParams::default());
    let put = calculate(100.0, &OptionParams::default().with_option_type(OptionType::Put));
    assert_relative_eq!(greeks.price, call.price + put.price, epsilon = 1e-12);
    assert_relative_eq!(greeks.gamma, 2.0 * call.gamma, epsilon = 1e-12);
}

#[test]
fn test_bull_call_spread_is_bounded() {
    let market = MarketEnv::default();
    let strategy = StructuredProduct::BullCall.strategy(100.0);
    let grid = SpotGrid::new(50.0, 200.0, 31);

    for point in spot_profile(&strategy, &market, &grid, &BumpConfig::default()) {
        // Worth between 0 and the discounted spread width
        assert!(point.greeks.price > 0.0);
        assert!(point.greeks.price < 10.0 * (-0.05f64).exp());
        assert!(point.greeks.delta > 0.0);
    }
}

#[test]
fn test_iron_condor_short_vega_at_centre() {
    let greeks = StructuredProduct::IronCondor
        .strategy(100.0)
        .greeks_at(100.0, &MarketEnv::default(), &BumpConfig::default());
    assert!(greeks.vega < 0.0);
    assert!(greeks.gamma < 0.0);
}

#[test]
fn test_profile_of_mixed_strategy() {
    let strategy = Strategy::new(vec![
        Leg::call(100.0).with_barrier(BarrierType::UpOut, 130.0),
        Leg::put(95.0).short().with_quantity(2.0),
    ]);
    let market = MarketEnv {
        dividend_yield: 0.01,
        ..MarketEnv::default()
    };
    let grid = SpotGrid::default();
    let profile = spot_profile(&strategy, &market, &grid, &BumpConfig::default());

    assert_eq!(profile.len(), grid.steps);
    assert_eq!(profile.first().map(|p| p.spot), Some(50.0));
    assert_eq!(profile.last().map(|p| p.spot), Some(150.0));

    // Above the barrier only the short put remains
    let beyond = profile.iter().find(|p| p.spot > 131.0).unwrap();
    let put_only = calculate(
        beyond.spot,
        &Leg::put(95.0).short().with_quantity(2.0).params(&market),
    );
    assert_relative_eq!(beyond.greeks.price, put_only.price, epsilon = 1e-12);
}

#[test]
fn test_default_surface_resolution() {
    let strategy = StructuredProduct::Strangle.strategy(100.0);
    let market = MarketEnv::default();
    let grid = SpotGrid::default().with_steps(SURFACE_RESOLUTION);
    let axis = MarketVariable::TimeToMaturity.default_axis(&market, SURFACE_RESOLUTION);

    let surface = sensitivity_surface(
        &strategy,
        &market,
        &grid,
        MarketVariable::TimeToMaturity,
        &axis,
        GreekMetric::Gamma,
        &BumpConfig::default(),
    );

    assert_eq!(surface.spots.len(), 40);
    assert_eq!(surface.axis.len(), 40);
    assert_eq!(surface.axis[0], 0.05);
    assert_eq!(surface.axis[39], 1.0);
    assert!(surface.values.iter().flatten().all(|g| g.is_finite() && *g >= 0.0));
}

#[test]
fn test_surface_row_equals_profile_in_shifted_market() {
    let strategy = Strategy::new(vec![Leg::put(100.0).with_barrier(BarrierType::DownIn, 85.0)]);
    let market = MarketEnv::default();
    let grid = SpotGrid::new(90.0, 120.0, 5);
    let axis = [0.1, 0.3];
    let config = BumpConfig::default();

    let surface = sensitivity_surface(
        &strategy,
        &market,
        &grid,
        MarketVariable::Volatility,
        &axis,
        GreekMetric::Price,
        &config,
    );

    for (row, &vol) in surface.values.iter().zip(axis.iter()) {
        let shifted = MarketVariable::Volatility.apply(&market, vol);
        let profile = spot_profile(&strategy, &shifted, &grid, &config);
        for (value, point) in row.iter().zip(profile) {
            assert_relative_eq!(*value, point.greeks.price, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_strategy_from_params() {
    let params = OptionParams::builder()
        .option_type(OptionType::Put)
        .position(Position::Short)
        .quantity(4.0)
        .build();
    let market = MarketEnv::default();
    let strategy: Strategy = std::iter::once(Leg::from(&params)).collect();
    assert_eq!(strategy.legs[0].params(&market), params);
}
