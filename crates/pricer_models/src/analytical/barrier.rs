//! Barrier option analytical pricing.
//!
//! Implements the Merton (1973) / Reiner-Rubinstein (1991) closed form for
//! European single-barrier options without rebate.
//!
//! # Barrier Types
//!
//! There are 8 types of single-barrier options:
//! - **Down-and-In/Out Call**: Barrier below spot
//! - **Down-and-In/Out Put**: Barrier below spot
//! - **Up-and-In/Out Call**: Barrier above spot
//! - **Up-and-In/Out Put**: Barrier above spot
//!
//! Knock-out prices come from the four terms A, B, C, D (Haug, 2007).
//! Knock-in prices use **In-Out Parity**: Knock-In + Knock-Out = Vanilla.

use pricer_core::types::{BarrierDirection, KnockType, OptionType};

use super::black_scholes::{is_degenerate, vanilla_price};
use super::distributions::{ln_norm_cdf, norm_cdf};
use crate::instruments::OptionParams;

/// The four standard terms of the barrier formula.
///
/// With φ = ±1 for call/put and η = ±1 for down/up barriers:
/// - A = φSe^(-qT)N(φx₁) - φKe^(-rT)N(φ(x₁ - σ√T))
/// - B = φSe^(-qT)N(φx₂) - φKe^(-rT)N(φ(x₂ - σ√T))
/// - C = φSe^(-qT)(H/S)^(2(μ+1))N(ηy₁) - φKe^(-rT)(H/S)^(2μ)N(η(y₁ - σ√T))
/// - D = φSe^(-qT)(H/S)^(2(μ+1))N(ηy₂) - φKe^(-rT)(H/S)^(2μ)N(η(y₂ - σ√T))
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierTerms {
    /// Vanilla term
    pub a: f64,
    /// Vanilla term struck at the barrier
    pub b: f64,
    /// Reflected vanilla term
    pub c: f64,
    /// Reflected term struck at the barrier
    pub d: f64,
}

impl BarrierTerms {
    /// Computes A, B, C, D for a non-degenerate option.
    ///
    /// Requires `T > 0`, `σ > 0` and `H > 0`. A term the case table never
    /// selects for this option may be infinite at very low volatility.
    pub fn new(
        spot: f64,
        params: &OptionParams,
        option_type: OptionType,
        direction: BarrierDirection,
    ) -> Self {
        let k = params.strike;
        let h = params.barrier_level;
        let t = params.time_to_maturity;
        let v = params.volatility;
        let r = params.risk_free_rate;
        let q = params.dividend_yield;

        let vst = v * t.sqrt();
        let mu = (r - q - 0.5 * v * v) / (v * v);
        let shift = (1.0 + mu) * vst;

        let x1 = (spot / k).ln() / vst + shift;
        let x2 = (spot / h).ln() / vst + shift;
        let y1 = (h * h / (spot * k)).ln() / vst + shift;
        let y2 = (h / spot).ln() / vst + shift;

        let df_rate = (-r * t).exp();
        let df_div = (-q * t).exp();
        let phi = option_type.phi();
        let eta = direction.eta();

        // (H/S)^p · N(x) in log space: with σ small |μ| is in the hundreds and
        // the power alone overflows while N(x) underflows.
        let ln_ratio = (h / spot).ln();
        let reflected = |power: f64, x: f64| (power * ln_ratio + ln_norm_cdf(x)).exp();
        let spot_power = 2.0 * (mu + 1.0);
        let strike_power = 2.0 * mu;

        let spot_leg = phi * spot * df_div;
        let strike_leg = phi * k * df_rate;

        Self {
            a: spot_leg * norm_cdf(phi * x1) - strike_leg * norm_cdf(phi * (x1 - vst)),
            b: spot_leg * norm_cdf(phi * x2) - strike_leg * norm_cdf(phi * (x2 - vst)),
            c: spot_leg * reflected(spot_power, eta * y1)
                - strike_leg * reflected(strike_power, eta * (y1 - vst)),
            d: spot_leg * reflected(spot_power, eta * y2)
                - strike_leg * reflected(strike_power, eta * (y2 - vst)),
        }
    }

    /// Knock-out price from the case table, before clamping.
    ///
    /// | Type | Direction | H ≤ K | H > K |
    /// |------|-----------|-------|-------|
    /// | Call | Down | A − C | B − D |
    /// | Call | Up | 0 | A − B + C − D |
    /// | Put | Down | A − B + C − D | 0 |
    /// | Put | Up | B − D | A − C |
    pub fn knock_out(
        &self,
        option_type: OptionType,
        direction: BarrierDirection,
        barrier_at_or_below_strike: bool,
    ) -> f64 {
        let Self { a, b, c, d } = *self;
        match (option_type, direction, barrier_at_or_below_strike) {
            (OptionType::Call, BarrierDirection::Down, true) => a - c,
            (OptionType::Call, BarrierDirection::Down, false) => b - d,
            (OptionType::Call, BarrierDirection::Up, true) => 0.0,
            (OptionType::Call, BarrierDirection::Up, false) => a - b + c - d,
            (OptionType::Put, BarrierDirection::Down, true) => a - b + c - d,
            (OptionType::Put, BarrierDirection::Down, false) => 0.0,
            (OptionType::Put, BarrierDirection::Up, true) => b - d,
            (OptionType::Put, BarrierDirection::Up, false) => a - c,
        }
    }
}

/// Price of the option at expiry (or with zero volatility / no barrier
/// level), where the barrier resolves against the current spot alone.
fn degenerate_price(spot: f64, params: &OptionParams) -> f64 {
    let intrinsic = params.option_type.intrinsic(spot, params.strike);
    if params.barrier_type.is_active(spot, params.barrier_level) {
        intrinsic
    } else {
        0.0
    }
}

/// Theoretical price of a single-barrier European option.
///
/// The result is for one long contract. With no barrier configured this is
/// the vanilla price.
///
/// # Edge cases
/// - `T <= 0`, `σ <= 0` or `H <= 0`: the barrier resolves against the spot;
///   knock-outs pay intrinsic unless breached, knock-ins pay intrinsic only
///   once breached.
/// - Spot already at or beyond the barrier: knock-outs are dead (0) and
///   knock-ins are vanilla options.
/// - Floating-point artefacts never produce a negative knock-out price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::barrier_price;
/// use pricer_models::instruments::OptionParams;
/// use pricer_core::types::BarrierType;
///
/// let up_out = OptionParams::default().with_barrier(BarrierType::UpOut, 120.0);
/// let up_in = OptionParams::default().with_barrier(BarrierType::UpIn, 120.0);
/// let vanilla = OptionParams::default();
///
/// let parity = barrier_price(100.0, &up_out) + barrier_price(100.0, &up_in)
///     - barrier_price(100.0, &vanilla);
/// assert!(parity.abs() < 1e-10);
/// ```
pub fn barrier_price(spot: f64, params: &OptionParams) -> f64 {
    let (direction, knock) = match (params.barrier_type.direction(), params.barrier_type.knock()) {
        (Some(direction), Some(knock)) => (direction, knock),
        _ => return vanilla_price(spot, params),
    };

    if is_degenerate(params) || params.barrier_level <= 0.0 {
        return degenerate_price(spot, params);
    }

    if direction.is_breached(spot, params.barrier_level) {
        return match knock {
            KnockType::Out => 0.0,
            KnockType::In => vanilla_price(spot, params),
        };
    }

    let option_type = params.option_type;
    let terms = BarrierTerms::new(spot, params, option_type, direction);
    let knock_out = terms.knock_out(
        option_type,
        direction,
        params.barrier_level <= params.strike,
    );
    debug_assert!(knock_out.is_finite(), "non-finite knock-out {knock_out} for {params:?}");
    let knock_out = knock_out.max(0.0);

    match knock {
        KnockType::Out => knock_out,
        KnockType::In => vanilla_price(spot, &params.without_barrier()).max(0.0) - knock_out,
    }
}
