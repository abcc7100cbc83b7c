//! Legs, shared market environment and multi-leg strategies.

use pricer_core::types::{BarrierType, OptionType, Position, PricingError};

use crate::greeks::{calculate_with_config, BumpConfig, Greeks};
use crate::instruments::OptionParams;

/// Market inputs shared by every leg of a strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MarketEnv {
    /// Time to maturity in years
    pub time_to_maturity: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Continuous dividend yield
    pub dividend_yield: f64,
}

impl Default for MarketEnv {
    fn default() -> Self {
        Self {
            time_to_maturity: 1.0,
            volatility: 0.20,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
        }
    }
}

/// One option position of a strategy.
///
/// Serialised with the field names `type`, `position`, `strike`,
/// `quantity`, `barrierType` and `barrierLevel`; everything but `type` and
/// `strike` may be omitted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Leg {
    /// Call or put
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub option_type: OptionType,
    /// Long or short
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Position,
    /// Strike price
    pub strike: f64,
    /// Number of contracts
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: f64,
    /// Barrier type
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier_type: BarrierType,
    /// Barrier level
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier_level: f64,
}

#[cfg(feature = "serde")]
fn default_quantity() -> f64 {
    1.0
}

impl Leg {
    /// One long vanilla contract.
    pub fn new(option_type: OptionType, strike: f64) -> Self {
        Self {
            option_type,
            position: Position::Long,
            strike,
            quantity: 1.0,
            barrier_type: BarrierType::None,
            barrier_level: 0.0,
        }
    }

    /// One long vanilla call.
    pub fn call(strike: f64) -> Self {
        Self::new(OptionType::Call, strike)
    }

    /// One long vanilla put.
    pub fn put(strike: f64) -> Self {
        Self::new(OptionType::Put, strike)
    }

    /// Same leg, short.
    pub fn short(self) -> Self {
        Self {
            position: Position::Short,
            ..self
        }
    }

    /// Same leg with a different quantity.
    pub fn with_quantity(self, quantity: f64) -> Self {
        Self { quantity, ..self }
    }

    /// Same leg with a barrier.
    pub fn with_barrier(self, barrier_type: BarrierType, barrier_level: f64) -> Self {
        Self {
            barrier_type,
            barrier_level,
            ..self
        }
    }

    /// Full option parameters of this leg in `market`.
    pub fn params(&self, market: &MarketEnv) -> OptionParams {
        OptionParams {
            strike: self.strike,
            time_to_maturity: market.time_to_maturity,
            volatility: market.volatility,
            risk_free_rate: market.risk_free_rate,
            dividend_yield: market.dividend_yield,
            option_type: self.option_type,
            position: self.position,
            quantity: self.quantity,
            barrier_type: self.barrier_type,
            barrier_level: self.barrier_level,
        }
    }
}

impl From<&OptionParams> for Leg {
    fn from(params: &OptionParams) -> Self {
        Self {
            option_type: params.option_type,
            position: params.position,
            strike: params.strike,
            quantity: params.quantity,
            barrier_type: params.barrier_type,
            barrier_level: params.barrier_level,
        }
    }
}

/// A set of legs valued together.
///
/// Serialises as a plain array of legs.
///
/// # Examples
/// ```
/// use pricer_models::greeks::BumpConfig;
/// use pricer_models::strategy::{Leg, MarketEnv, Strategy};
///
/// let straddle = Strategy::new(vec![Leg::call(100.0), Leg::put(100.0)]);
/// let greeks = straddle.greeks_at(100.0, &MarketEnv::default(), &BumpConfig::default());
///
/// // Call delta + put delta = 2N(d1) - 1
/// assert!((greeks.delta - 0.2736613).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Strategy {
    /// Legs in insertion order
    pub legs: Vec<Leg>,
}

impl Strategy {
    /// Creates a strategy from legs.
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// Appends a leg.
    pub fn push(&mut self, leg: Leg) {
        self.legs.push(leg);
    }

    /// Returns true when the strategy has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Validates every leg in `market`.
    ///
    /// # Errors
    /// The first leg's [`PricingError`], prefixed with its index.
    pub fn validate(&self, market: &MarketEnv) -> Result<(), PricingError> {
        for (i, leg) in self.legs.iter().enumerate() {
            leg.params(market).validate().map_err(|e| match e {
                PricingError::InvalidInput(msg) => {
                    PricingError::InvalidInput(format!("leg {}: {}", i, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Field-wise sum of the scaled Greeks of every leg at `spot`.
    ///
    /// An empty strategy yields all zeros.
    pub fn greeks_at(&self, spot: f64, market: &MarketEnv, config: &BumpConfig) -> Greeks {
        self.legs
            .iter()
            .map(|leg| calculate_with_config(spot, &leg.params(market), config))
            .sum()
    }
}

impl FromIterator<Leg> for Strategy {
    fn from_iter<I: IntoIterator<Item = Leg>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeks::calculate;
    use approx::assert_relative_eq;

    #[test]
    fn test_leg_params_combine_market() {
        let market = MarketEnv {
            time_to_maturity: 0.5,
            volatility: 0.3,
            risk_free_rate: 0.01,
            dividend_yield: 0.02,
        };
        let leg = Leg::put(90.0).short().with_quantity(2.0).with_barrier(BarrierType::DownIn, 80.0);
        let params = leg.params(&market);

        assert_eq!(params.strike, 90.0);
        assert_eq!(params.time_to_maturity, 0.5);
        assert_eq!(params.volatility, 0.3);
        assert_eq!(params.dividend_yield, 0.02);
        assert_eq!(params.option_type, OptionType::Put);
        assert_eq!(params.position, Position::Short);
        assert_eq!(params.quantity, 2.0);
        assert_eq!(params.barrier_type, BarrierType::DownIn);
        assert_eq!(Leg::from(&params), leg);
    }

    #[test]
    fn test_empty_strategy_is_zero() {
        let greeks = Strategy::default().greeks_at(100.0, &MarketEnv::default(), &BumpConfig::default());
        assert_eq!(greeks, Greeks::default());
    }

    #[test]
    fn test_greeks_are_sum_of_legs() {
        let market = MarketEnv::default();
        let legs = vec![
            Leg::call(100.0),
            Leg::put(95.0).short().with_quantity(2.0),
            Leg::call(105.0).with_barrier(BarrierType::UpOut, 130.0),
        ];
        let expected: Greeks = legs.iter().map(|l| calculate(101.0, &l.params(&market))).sum();
        let actual = Strategy::new(legs).greeks_at(101.0, &market, &BumpConfig::default());

        for ((_, e), (_, a)) in expected.entries().zip(actual.entries()) {
            assert_relative_eq!(a, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_long_and_short_cancel() {
        let strategy: Strategy = [Leg::call(100.0), Leg::call(100.0).short()].into_iter().collect();
        let greeks = strategy.greeks_at(100.0, &MarketEnv::default(), &BumpConfig::default());
        assert!(greeks.entries().all(|(_, v)| v.abs() < 1e-12));
    }

    #[test]
    fn test_validate_reports_leg_index() {
        let strategy = Strategy::new(vec![Leg::call(100.0), Leg::put(-1.0)]);
        match strategy.validate(&MarketEnv::default()) {
            Err(PricingError::InvalidInput(msg)) => assert!(msg.starts_with("leg 1")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_leg_file() {
        let json = r#"[
            {"type": "Call", "strike": 100},
            {"type": "put", "position": "Short", "strike": 90, "quantity": 2,
             "barrierType": "DownOut", "barrierLevel": 80}
        ]"#;
        let strategy: Strategy = serde_json::from_str(json).unwrap();
        assert_eq!(strategy.legs[0], Leg::call(100.0));
        assert_eq!(
            strategy.legs[1],
            Leg::put(90.0).short().with_quantity(2.0).with_barrier(BarrierType::DownOut, 80.0)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_rejects_unknown_tokens() {
        let json = r#"[{"type": "Straddle", "strike": 100}]"#;
        assert!(serde_json::from_str::<Strategy>(json).is_err());

        let json = r#"[{"type": "Call", "strike": 100, "barrierType": "Sideways"}]"#;
        assert!(serde_json::from_str::<Strategy>(json).is_err());
    }
}
