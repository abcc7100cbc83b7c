//! Black-Scholes-Merton pricing for European options.
//!
//! This module provides the closed-form price and Greeks up to third order
//! for European calls and puts on an asset with a continuous dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Gamma, vega and every higher-order Greek are identical for calls and puts.

use pricer_core::types::OptionType;

use super::distributions::{norm_cdf, norm_pdf};
use crate::greeks::Greeks;
use crate::instruments::OptionParams;

/// Intermediate terms shared by every formula in this module.
#[derive(Clone, Copy, Debug)]
struct Terms {
    d1: f64,
    d2: f64,
    /// σ√T
    vol_sqrt_t: f64,
    /// e^(-rT)
    df_rate: f64,
    /// e^(-qT)
    df_div: f64,
}

impl Terms {
    #[inline]
    fn new(spot: f64, params: &OptionParams) -> Self {
        let t = params.time_to_maturity;
        let v = params.volatility;
        let r = params.risk_free_rate;
        let q = params.dividend_yield;

        let vol_sqrt_t = v * t.sqrt();
        let d1 = ((spot / params.strike).ln() + (r - q + 0.5 * v * v) * t) / vol_sqrt_t;

        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            vol_sqrt_t,
            df_rate: (-r * t).exp(),
            df_div: (-q * t).exp(),
        }
    }
}

/// Returns true when the option has collapsed to its intrinsic value.
#[inline]
pub(crate) fn is_degenerate(params: &OptionParams) -> bool {
    params.time_to_maturity <= 0.0 || params.volatility <= 0.0
}

/// Closed-form price of a European option, ignoring any barrier.
///
/// Cheaper than [`calculate_vanilla`] when only the price is needed.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes::vanilla_price;
/// use pricer_models::instruments::OptionParams;
///
/// let price = vanilla_price(100.0, &OptionParams::default().with_rate(0.05));
/// assert!((price - 10.4506).abs() < 1e-4);
/// ```
pub fn vanilla_price(spot: f64, params: &OptionParams) -> f64 {
    let strike = params.strike;
    if is_degenerate(params) {
        return params.option_type.intrinsic(spot, strike);
    }

    let tm = Terms::new(spot, params);
    match params.option_type {
        OptionType::Call => {
            spot * tm.df_div * norm_cdf(tm.d1) - strike * tm.df_rate * norm_cdf(tm.d2)
        }
        OptionType::Put => {
            strike * tm.df_rate * norm_cdf(-tm.d2) - spot * tm.df_div * norm_cdf(-tm.d1)
        }
    }
}

/// Closed-form price and Greeks of a European option.
///
/// The result is for one long contract: position and quantity are applied by
/// the dispatcher, and any barrier in `params` is ignored.
///
/// # Degenerate inputs
///
/// With `T <= 0` or `σ <= 0` the option is worth its intrinsic value. Delta
/// is then the exercise indicator (1 for a call with `S > K`, -1 for a put
/// with `S < K`, else 0) and every other sensitivity is zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::calculate_vanilla;
/// use pricer_models::instruments::OptionParams;
///
/// let greeks = calculate_vanilla(100.0, &OptionParams::default());
/// assert!((greeks.price - 10.4506).abs() < 1e-4);
/// assert!((greeks.delta - 0.6368).abs() < 1e-4);
/// ```
pub fn calculate_vanilla(spot: f64, params: &OptionParams) -> Greeks {
    let strike = params.strike;
    let payoff = params.option_type.intrinsic(spot, strike);

    if is_degenerate(params) {
        let delta = match params.option_type {
            OptionType::Call if spot > strike => 1.0,
            OptionType::Put if spot < strike => -1.0,
            _ => 0.0,
        };
        return Greeks {
            price: payoff,
            delta,
            payoff,
            ..Greeks::default()
        };
    }

    let t = params.time_to_maturity;
    let v = params.volatility;
    let r = params.risk_free_rate;
    let q = params.dividend_yield;

    let tm = Terms::new(spot, params);
    let (d1, d2, vst) = (tm.d1, tm.d2, tm.vol_sqrt_t);
    let sqrt_t = t.sqrt();
    let pdf_d1 = norm_pdf(d1);

    // Direction-independent terms
    let gamma = tm.df_div * pdf_d1 / (spot * vst);
    let vega = spot * tm.df_div * sqrt_t * pdf_d1;
    let speed = -gamma / spot * (d1 / vst + 1.0);
    let zomma = gamma * (d1 * d2 - 1.0) / v;
    // ∂Γ/∂t in calendar time, same convention as theta
    let color = tm.df_div * pdf_d1 / (2.0 * spot * t * vst)
        * (2.0 * q * t + 1.0 + (2.0 * (r - q) * t - d2 * vst) * d1 / vst);
    let vanna = -tm.df_div * pdf_d1 * d2 / v;
    let volga = vega * d1 * d2 / v;
    let ultima = -vega * (d1 * d2 * (1.0 - d1 * d2) + d1 * d1 + d2 * d2) / (v * v);

    let decay = -(spot * tm.df_div * pdf_d1 * v) / (2.0 * sqrt_t);

    let (price, delta, theta, rho) = match params.option_type {
        OptionType::Call => {
            let n_d1 = norm_cdf(d1);
            let n_d2 = norm_cdf(d2);
            (
                spot * tm.df_div * n_d1 - strike * tm.df_rate * n_d2,
                tm.df_div * n_d1,
                decay - r * strike * tm.df_rate * n_d2 + q * spot * tm.df_div * n_d1,
                strike * t * tm.df_rate * n_d2,
            )
        }
        OptionType::Put => {
            let n_md1 = norm_cdf(-d1);
            let n_md2 = norm_cdf(-d2);
            (
                strike * tm.df_rate * n_md2 - spot * tm.df_div * n_md1,
                -tm.df_div * n_md1,
                decay + r * strike * tm.df_rate * n_md2 - q * spot * tm.df_div * n_md1,
                -strike * t * tm.df_rate * n_md2,
            )
        }
    };

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
