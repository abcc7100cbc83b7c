//! Greeks calculation result type.
//!
//! Provides [`Greeks`], the fourteen-field output record of every pricer,
//! and [`GreekMetric`] for selecting one field by name.
//!
//! # First-Order Greeks
//!
//! - `delta`: ∂V/∂S
//! - `vega`: ∂V/∂σ
//! - `theta`: ∂V/∂t (calendar time, value lost per year)
//! - `rho`: ∂V/∂r
//!
//! # Second-Order Greeks
//!
//! - `gamma`: ∂²V/∂S²
//! - `vanna`: ∂²V/∂S∂σ
//! - `volga`: ∂²V/∂σ²
//!
//! # Third-Order Greeks
//!
//! - `speed`: ∂³V/∂S³
//! - `zomma`: ∂³V/∂S²∂σ
//! - `color`: ∂³V/∂S²∂t
//! - `ultima`: ∂³V/∂σ³

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Price, payoff and sensitivities of an option position.
///
/// Every field defaults to zero; fields that do not apply to a computation
/// path stay zero rather than undefined.
///
/// # Examples
///
/// ```rust
/// use pricer_models::greeks::Greeks;
///
/// let one = Greeks { price: 2.0, delta: 0.5, ..Default::default() };
/// let book = one + one.scaled(-3.0);
/// assert_eq!(book.price, -4.0);
/// assert_eq!(book.delta, -1.0);
/// assert_eq!(book.gamma, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Greeks {
    /// Present value.
    pub price: f64,
    /// Delta: ∂V/∂S.
    pub delta: f64,
    /// Gamma: ∂²V/∂S².
    pub gamma: f64,
    /// Theta: ∂V/∂t.
    pub theta: f64,
    /// Vega: ∂V/∂σ.
    pub vega: f64,
    /// Rho: ∂V/∂r.
    pub rho: f64,
    /// Intrinsic value at the current spot.
    pub payoff: f64,
    /// Price minus payoff.
    pub time_value: f64,
    /// Speed: ∂Γ/∂S.
    pub speed: f64,
    /// Zomma: ∂Γ/∂σ.
    pub zomma: f64,
    /// Color: ∂Γ/∂t.
    pub color: f64,
    /// Vanna: ∂Δ/∂σ.
    pub vanna: f64,
    /// Volga (vomma): ∂vega/∂σ.
    pub volga: f64,
    /// Ultima: ∂volga/∂σ.
    pub ultima: f64,
}

impl Greeks {
    /// Returns a copy with every field multiplied by `factor`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            price: self.price * factor,
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
            payoff: self.payoff * factor,
            time_value: self.time_value * factor,
            speed: self.speed * factor,
            zomma: self.zomma * factor,
            color: self.color * factor,
            vanna: self.vanna * factor,
            volga: self.volga * factor,
            ultima: self.ultima * factor,
        }
    }

    /// Reads one field by metric.
    #[inline]
    pub fn get(&self, metric: GreekMetric) -> f64 {
        match metric {
            GreekMetric::Price => self.price,
            GreekMetric::Delta => self.delta,
            GreekMetric::Gamma => self.gamma,
            GreekMetric::Theta => self.theta,
            GreekMetric::Vega => self.vega,
            GreekMetric::Rho => self.rho,
            GreekMetric::Payoff => self.payoff,
            GreekMetric::TimeValue => self.time_value,
            GreekMetric::Speed => self.speed,
            GreekMetric::Zomma => self.zomma,
            GreekMetric::Color => self.color,
            GreekMetric::Vanna => self.vanna,
            GreekMetric::Volga => self.volga,
            GreekMetric::Ultima => self.ultima,
        }
    }

    /// `(metric, value)` pairs in [`GreekMetric::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (GreekMetric, f64)> + '_ {
        GreekMetric::ALL.iter().map(move |&m| (m, self.get(m)))
    }
}

impl Add for Greeks {
    type Output = Greeks;

    fn add(mut self, rhs: Greeks) -> Greeks {
        self += rhs;
        self
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Greeks) {
        self.price += rhs.price;
        self.delta += rhs.delta;
        self.gamma += rhs.gamma;
        self.theta += rhs.theta;
        self.vega += rhs.vega;
        self.rho += rhs.rho;
        self.payoff += rhs.payoff;
        self.time_value += rhs.time_value;
        self.speed += rhs.speed;
        self.zomma += rhs.zomma;
        self.color += rhs.color;
        self.vanna += rhs.vanna;
        self.volga += rhs.volga;
        self.ultima += rhs.ultima;
    }
}

impl Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Greeks {
        iter.fold(Greeks::default(), Add::add)
    }
}

/// Names one field of [`Greeks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GreekMetric {
    /// `price`
    Price,
    /// `delta`
    Delta,
    /// `gamma`
    Gamma,
    /// `theta`
    Theta,
    /// `vega`
    Vega,
    /// `rho`
    Rho,
    /// `payoff`
    Payoff,
    /// `timeValue`
    TimeValue,
    /// `speed`
    Speed,
    /// `zomma`
    Zomma,
    /// `color`
    Color,
    /// `vanna`
    Vanna,
    /// `volga`
    Volga,
    /// `ultima`
    Ultima,
}

impl GreekMetric {
    /// Every metric, in output column order.
    pub const ALL: [GreekMetric; 14] = [
        GreekMetric::Price,
        GreekMetric::Delta,
        GreekMetric::Gamma,
        GreekMetric::Theta,
        GreekMetric::Vega,
        GreekMetric::Rho,
        GreekMetric::Payoff,
        GreekMetric::TimeValue,
        GreekMetric::Speed,
        GreekMetric::Zomma,
        GreekMetric::Color,
        GreekMetric::Vanna,
        GreekMetric::Volga,
        GreekMetric::Ultima,
    ];

    /// Field name as used in JSON and CSV output.
    pub fn name(self) -> &'static str {
        match self {
            GreekMetric::Price => "price",
            GreekMetric::Delta => "delta",
            GreekMetric::Gamma => "gamma",
            GreekMetric::Theta => "theta",
            GreekMetric::Vega => "vega",
            GreekMetric::Rho => "rho",
            GreekMetric::Payoff => "payoff",
            GreekMetric::TimeValue => "timeValue",
            GreekMetric::Speed => "speed",
            GreekMetric::Zomma => "zomma",
            GreekMetric::Color => "color",
            GreekMetric::Vanna => "vanna",
            GreekMetric::Volga => "volga",
            GreekMetric::Ultima => "ultima",
        }
    }
}

impl FromStr for GreekMetric {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace('_', "").to_ascii_lowercase();
        GreekMetric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(&normalised))
            .or(match normalised.as_str() {
                "vomma" => Some(GreekMetric::Volga),
                _ => None,
            })
            .ok_or_else(|| PricingError::InvalidInput(format!("unknown metric '{}'", s)))
    }
}

impl fmt::Display for GreekMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
