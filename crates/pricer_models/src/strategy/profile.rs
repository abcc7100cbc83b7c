//! Greeks of a strategy across a range of spot prices.

use rayon::prelude::*;

use super::leg::{MarketEnv, Strategy};
use crate::greeks::{BumpConfig, Greeks};

/// Evenly spaced spot prices from `min` to `max` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpotGrid {
    /// First spot
    pub min: f64,
    /// Last spot
    pub max: f64,
    /// Number of points (at least two are always produced)
    pub steps: usize,
}

impl Default for SpotGrid {
    fn default() -> Self {
        Self {
            min: 50.0,
            max: 150.0,
            steps: 100,
        }
    }
}

impl SpotGrid {
    /// Creates a grid.
    pub fn new(min: f64, max: f64, steps: usize) -> Self {
        Self { min, max, steps }
    }

    /// Same range with a different number of points.
    pub fn with_steps(self, steps: usize) -> Self {
        Self { steps, ..self }
    }

    /// The grid points, `max(steps, 2)` of them.
    ///
    /// ```
    /// use pricer_models::strategy::SpotGrid;
    ///
    /// assert_eq!(SpotGrid::new(90.0, 110.0, 3).points(), vec![90.0, 100.0, 110.0]);
    /// assert_eq!(SpotGrid::new(90.0, 110.0, 0).points(), vec![90.0, 110.0]);
    /// ```
    pub fn points(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.steps)
    }
}

/// `max(n, 2)` evenly spaced values from `min` to `max` inclusive; the last is exactly `max`.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let step = (max - min) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { max } else { min + i as f64 * step })
        .collect()
}

/// Greeks of a strategy at one spot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfilePoint {
    /// Spot price
    pub spot: f64,
    /// Summed Greeks at `spot`
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub greeks: Greeks,
}

/// Evaluates `strategy` at every point of `grid` in parallel.
///
/// Points are returned in grid order.
pub fn spot_profile(
    strategy: &Strategy,
    market: &MarketEnv,
    grid: &SpotGrid,
    config: &BumpConfig,
) -> Vec<ProfilePoint> {
    let spots = grid.points();
    tracing::debug!(legs = strategy.legs.len(), points = spots.len(), "computing spot profile");

    spots
        .into_par_iter()
        .map(|spot| ProfilePoint {
            spot,
            greeks: strategy.greeks_at(spot, market, config),
        })
        .collect()
}
