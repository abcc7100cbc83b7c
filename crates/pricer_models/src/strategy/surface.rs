//! Sensitivity surfaces: one Greek against spot and one market variable.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;
use rayon::prelude::*;

use super::leg::{MarketEnv, Strategy};
use super::profile::{linspace, SpotGrid};
use crate::greeks::{BumpConfig, GreekMetric};

/// Default number of points along each surface axis.
pub const SURFACE_RESOLUTION: usize = 40;

/// Market input varied along the second surface axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarketVariable {
    /// Time to maturity (T)
    TimeToMaturity,
    /// Volatility (σ)
    Volatility,
    /// Risk-free rate (r)
    RiskFreeRate,
    /// Dividend yield (q)
    DividendYield,
}

impl MarketVariable {
    /// All variables.
    pub const ALL: [MarketVariable; 4] = [
        MarketVariable::TimeToMaturity,
        MarketVariable::Volatility,
        MarketVariable::RiskFreeRate,
        MarketVariable::DividendYield,
    ];

    /// Long name.
    pub fn name(self) -> &'static str {
        match self {
            MarketVariable::TimeToMaturity => "timeToMaturity",
            MarketVariable::Volatility => "volatility",
            MarketVariable::RiskFreeRate => "riskFreeRate",
            MarketVariable::DividendYield => "dividendYield",
        }
    }

    /// One-letter alias.
    pub fn symbol(self) -> &'static str {
        match self {
            MarketVariable::TimeToMaturity => "t",
            MarketVariable::Volatility => "v",
            MarketVariable::RiskFreeRate => "r",
            MarketVariable::DividendYield => "q",
        }
    }

    /// Current value of this variable in `market`.
    pub fn get(self, market: &MarketEnv) -> f64 {
        match self {
            MarketVariable::TimeToMaturity => market.time_to_maturity,
            MarketVariable::Volatility => market.volatility,
            MarketVariable::RiskFreeRate => market.risk_free_rate,
            MarketVariable::DividendYield => market.dividend_yield,
        }
    }

    /// Copy of `market` with this variable set to `value`.
    pub fn apply(self, market: &MarketEnv, value: f64) -> MarketEnv {
        let mut out = *market;
        match self {
            MarketVariable::TimeToMaturity => out.time_to_maturity = value,
            MarketVariable::Volatility => out.volatility = value,
            MarketVariable::RiskFreeRate => out.risk_free_rate = value,
            MarketVariable::DividendYield => out.dividend_yield = value,
        }
        out
    }

    /// Axis range `(min, max)` used when none is given.
    ///
    /// Maturity runs from 0.05 to the current maturity, or to 2 years when
    /// the current maturity is 0.1 or less.
    pub fn default_range(self, market: &MarketEnv) -> (f64, f64) {
        match self {
            MarketVariable::TimeToMaturity => {
                let t = market.time_to_maturity;
                (0.05, if t > 0.1 { t } else { 2.0 })
            }
            MarketVariable::Volatility => (0.05, 1.0),
            MarketVariable::RiskFreeRate => (0.0, 0.20),
            MarketVariable::DividendYield => (0.0, 0.10),
        }
    }

    /// `steps` evenly spaced values over [`default_range`](Self::default_range).
    pub fn default_axis(self, market: &MarketEnv, steps: usize) -> Vec<f64> {
        let (min, max) = self.default_range(market);
        linspace(min, max, steps)
    }
}

impl FromStr for MarketVariable {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        MarketVariable::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(token) || v.symbol().eq_ignore_ascii_case(token))
            .ok_or_else(|| PricingError::InvalidInput(format!("unknown market variable '{}'", s)))
    }
}

impl fmt::Display for MarketVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grid of one metric over spot × market variable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Surface {
    /// Metric sampled
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))]
    pub metric: GreekMetric,
    /// Market variable along the second axis
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))]
    pub variable: MarketVariable,
    /// Spot axis
    pub spots: Vec<f64>,
    /// Market variable axis
    pub axis: Vec<f64>,
    /// `values[j][i]` is the metric at `spots[i]` with the variable at `axis[j]`
    pub values: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Samples `metric` of `strategy` over `spot_grid` × `axis`.
///
/// Each row holds `variable` fixed at one axis value; rows are computed in
/// parallel.
///
/// # Examples
/// ```
/// use pricer_models::greeks::{BumpConfig, GreekMetric};
/// use pricer_models::strategy::{sensitivity_surface, Leg, MarketEnv, MarketVariable, SpotGrid, Strategy};
///
/// let strategy = Strategy::new(vec![Leg::call(100.0)]);
/// let market = MarketEnv::default();
/// let axis = MarketVariable::Volatility.default_axis(&market, 5);
/// let surface = sensitivity_surface(
///     &strategy,
///     &market,
///     &SpotGrid::new(80.0, 120.0, 9),
///     MarketVariable::Volatility,
///     &axis,
///     GreekMetric::Vega,
///     &BumpConfig::default(),
/// );
/// assert_eq!(surface.values.len(), 5);
/// assert_eq!(surface.values[0].len(), 9);
/// ```
pub fn sensitivity_surface(
    strategy: &Strategy,
    market: &MarketEnv,
    spot_grid: &SpotGrid,
    variable: MarketVariable,
    axis: &[f64],
    metric: GreekMetric,
    config: &BumpConfig,
) -> Surface {
    let spots = spot_grid.points();
    tracing::debug!(
        %metric,
        %variable,
        rows = axis.len(),
        columns = spots.len(),
        "computing sensitivity surface"
    );

    let values = axis
        .par_iter()
        .map(|&value| {
            let shifted = variable.apply(market, value);
            spots
                .iter()
                .map(|&spot| strategy.greeks_at(spot, &shifted, config).get(metric))
                .collect()
        })
        .collect();

    Surface {
        metric,
        variable,
        spots,
        axis: axis.to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeks::calculate;
    use crate::strategy::Leg;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("t".parse::<MarketVariable>().unwrap(), MarketVariable::TimeToMaturity);
        assert_eq!("timeToMaturity".parse::<MarketVariable>().unwrap(), MarketVariable::TimeToMaturity);
        assert_eq!("V".parse::<MarketVariable>().unwrap(), MarketVariable::Volatility);
        assert_eq!("riskfreerate".parse::<MarketVariable>().unwrap(), MarketVariable::RiskFreeRate);
        assert_eq!("q".parse::<MarketVariable>().unwrap(), MarketVariable::DividendYield);
        assert!("spot".parse::<MarketVariable>().is_err());
    }

    #[test]
    fn test_apply_replaces_one_variable() {
        let market = MarketEnv::default();
        for variable in MarketVariable::ALL {
            let shifted = variable.apply(&market, 0.123);
            assert_eq!(variable.get(&shifted), 0.123);
            for other in MarketVariable::ALL.into_iter().filter(|&o| o != variable) {
                assert_eq!(other.get(&shifted), other.get(&market));
            }
        }
    }

    #[test]
    fn test_default_ranges() {
        let market = MarketEnv::default();
        assert_eq!(MarketVariable::TimeToMaturity.default_range(&market), (0.05, 1.0));
        assert_eq!(MarketVariable::Volatility.default_range(&market), (0.05, 1.0));
        assert_eq!(MarketVariable::RiskFreeRate.default_range(&market), (0.0, 0.20));
        assert_eq!(MarketVariable::DividendYield.default_range(&market), (0.0, 0.10));

        let short_dated = MarketVariable::TimeToMaturity.apply(&market, 0.1);
        assert_eq!(MarketVariable::TimeToMaturity.default_range(&short_dated), (0.05, 2.0));
    }

    #[test]
    fn test_surface_shape_and_values() {
        let strategy = Strategy::new(vec![Leg::call(100.0), Leg::put(95.0).short()]);
        let market = MarketEnv::default();
        let grid = SpotGrid::new(90.0, 110.0, 4);
        let axis = MarketVariable::RiskFreeRate.default_axis(&market, 3);

        let surface = sensitivity_surface(
            &strategy,
            &market,
            &grid,
            MarketVariable::RiskFreeRate,
            &axis,
            GreekMetric::Delta,
            &BumpConfig::default(),
        );

        assert_eq!(surface.axis, vec![0.0, 0.1, 0.2]);
        assert_eq!(surface.spots, grid.points());
        assert_eq!(surface.values.len(), 3);
        assert!(surface.values.iter().all(|row| row.len() == 4));

        let shifted = MarketVariable::RiskFreeRate.apply(&market, 0.2);
        let spot = surface.spots[1];
        let expected: f64 = strategy
            .legs
            .iter()
            .map(|l| calculate(spot, &l.params(&shifted)).delta)
            .sum();
        assert_relative_eq!(surface.values[2][1], expected, epsilon = 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_surface_serialises_names() {
        let surface = sensitivity_surface(
            &Strategy::new(vec![Leg::call(100.0)]),
            &MarketEnv::default(),
            &SpotGrid::new(90.0, 110.0, 2),
            MarketVariable::Volatility,
            &[0.2],
            GreekMetric::TimeValue,
            &BumpConfig::default(),
        );
        let json = serde_json::to_value(&surface).unwrap();
        assert_eq!(json["metric"], "timeValue");
        assert_eq!(json["variable"], "volatility");
        assert_eq!(json["values"][0].as_array().unwrap().len(), 2);
    }
}
