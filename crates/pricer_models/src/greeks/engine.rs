//! Greeks dispatcher.
//!
//! Vanilla options use the closed forms in [`crate::analytical`]. Barrier
//! options are priced in closed form and their sensitivities are obtained by
//! bump-and-revalue of [`barrier_price`]. Either way the result is scaled by
//! the position sign and quantity.

use tracing::trace;

use super::config::BumpConfig;
use super::result::Greeks;
use crate::analytical::{barrier_price, calculate_vanilla};
use crate::instruments::OptionParams;

/// Price and Greeks of an option position with default bump widths.
///
/// # Examples
/// ```
/// use pricer_models::greeks::calculate;
/// use pricer_models::instruments::OptionParams;
/// use pricer_core::types::Position;
///
/// let long = calculate(100.0, &OptionParams::default());
/// assert!((long.price - 10.4506).abs() < 1e-4);
/// assert!((long.delta - 0.6368).abs() < 1e-4);
///
/// let short = calculate(100.0, &OptionParams::default().with_position(Position::Short));
/// assert_eq!(short.price, -long.price);
/// ```
pub fn calculate(spot: f64, params: &OptionParams) -> Greeks {
    calculate_with_config(spot, params, &BumpConfig::default())
}

/// Price and Greeks of an option position with explicit bump widths.
///
/// `config` only affects barrier options.
pub fn calculate_with_config(spot: f64, params: &OptionParams, config: &BumpConfig) -> Greeks {
    let scale = params.multiplier();

    if !params.has_barrier() {
        trace!(spot, scale, path = "vanilla", "calculating greeks");
        return calculate_vanilla(spot, params).scaled(scale);
    }

    trace!(
        spot,
        scale,
        path = "barrier",
        barrier = %params.barrier_type,
        level = params.barrier_level,
        "calculating greeks"
    );
    barrier_greeks(spot, params, config).scaled(scale)
}

/// Unscaled finite-difference Greeks of a barrier option.
fn barrier_greeks(spot: f64, params: &OptionParams, config: &BumpConfig) -> Greeks {
    let price = barrier_price(spot, params);
    let payoff = if params.barrier_type.is_active(spot, params.barrier_level) {
        params.option_type.intrinsic(spot, params.strike)
    } else {
        0.0
    };

    let ds = config.spot_bump(spot);
    let dv = config.vol_bump;
    let dt = config.time_bump_years;
    let dr = config.rate_bump;

    // Spot stencils on an arbitrary set of parameters
    let delta_at = |p: &OptionParams| {
        (barrier_price(spot + ds, p) - barrier_price(spot - ds, p)) / (2.0 * ds)
    };
    let gamma_at = |p: &OptionParams, centre: f64| {
        (barrier_price(spot + ds, p) - 2.0 * centre + barrier_price(spot - ds, p)) / (ds * ds)
    };

    let delta = delta_at(params);
    let gamma = gamma_at(params, price);

    let h = config.speed_bump(spot);
    let speed = (barrier_price(spot + 2.0 * h, params) - 2.0 * barrier_price(spot + h, params)
        + 2.0 * barrier_price(spot - h, params)
        - barrier_price(spot - 2.0 * h, params))
        / (2.0 * h * h * h);

    // Calendar time: one day closer to expiry
    let (theta, color) = if params.time_to_maturity > dt {
        let shorter = params.with_maturity(params.time_to_maturity - dt);
        let shorter_price = barrier_price(spot, &shorter);
        let theta = (shorter_price - price) / dt;
        let color = (gamma_at(&shorter, shorter_price) - gamma) / dt;
        (theta, color)
    } else {
        (0.0, 0.0)
    };

    let vol_up = params.with_volatility(params.volatility + dv);
    let vol_down = params.with_volatility(params.volatility - dv);
    let price_vol_up = barrier_price(spot, &vol_up);
    let price_vol_down = barrier_price(spot, &vol_down);

    let vega = (price_vol_up - price_vol_down) / (2.0 * dv);
    let volga = (price_vol_up - 2.0 * price + price_vol_down) / (dv * dv);
    let zomma = (gamma_at(&vol_up, price_vol_up) - gamma_at(&vol_down, price_vol_down)) / (2.0 * dv);
    let vanna = (delta_at(&vol_up) - delta_at(&vol_down)) / (2.0 * dv);

    let dv3 = config.ultima_vol_bump;
    let price_at_vol = |shift: f64| barrier_price(spot, &params.with_volatility(params.volatility + shift));
    let ultima = (price_at_vol(2.0 * dv3) - 2.0 * price_at_vol(dv3) + 2.0 * price_at_vol(-dv3)
        - price_at_vol(-2.0 * dv3))
        / (2.0 * dv3 * dv3 * dv3);

    let rho = (barrier_price(spot, &params.with_rate(params.risk_free_rate + dr))
        - barrier_price(spot, &params.with_rate(params.risk_free_rate - dr)))
        / (2.0 * dr);

    Greeks {
        price,
        delta,
        gamma,
        theta,
        vega,
        rho,
        payoff,
        time_value: price - payoff,
        speed,
        zomma,
        color,
        vanna,
        volga,
        ultima,
    }
}
