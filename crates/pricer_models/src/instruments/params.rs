//! Option parameters.
//!
//! [`OptionParams`] is an immutable `Copy` value describing one European
//! option position. Bump-and-revalue code never mutates it: every
//! `with_*` method returns a new value that differs in exactly one field.

use pricer_core::types::{BarrierType, OptionType, Position, PricingError};

/// Parameters of a single European option position.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionParams;
/// use pricer_core::types::{BarrierType, OptionType};
///
/// let params = OptionParams::builder()
///     .strike(105.0)
///     .option_type(OptionType::Put)
///     .barrier(BarrierType::DownOut, 80.0)
///     .build();
///
/// let bumped = params.with_volatility(0.25);
/// assert_eq!(bumped.volatility, 0.25);
/// assert_eq!(bumped.strike, params.strike);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    /// Strike price (K)
    pub strike: f64,
    /// Time to maturity in years (T); non-positive means expired
    pub time_to_maturity: f64,
    /// Annualised volatility as a decimal (σ)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (r)
    pub risk_free_rate: f64,
    /// Continuous dividend yield (q)
    pub dividend_yield: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Long or short
    pub position: Position,
    /// Number of contracts (non-negative)
    pub quantity: f64,
    /// Barrier type, [`BarrierType::None`] for vanilla options
    pub barrier_type: BarrierType,
    /// Barrier level (H); ignored when `barrier_type` is `None`
    pub barrier_level: f64,
}

impl Default for OptionParams {
    fn default() -> Self {
        Self {
            strike: 100.0,
            time_to_maturity: 1.0,
            volatility: 0.20,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
            option_type: OptionType::Call,
            position: Position::Long,
            quantity: 1.0,
            barrier_type: BarrierType::None,
            barrier_level: 0.0,
        }
    }
}

impl OptionParams {
    /// Creates a builder starting from the default parameters
    /// (ATM 100 strike, 1y, 20% vol, 5% rate, long one call, no barrier).
    pub fn builder() -> OptionParamsBuilder {
        OptionParamsBuilder::default()
    }

    /// Returns true when a barrier is configured.
    #[inline]
    pub fn has_barrier(&self) -> bool {
        self.barrier_type.is_barrier()
    }

    /// Position sign times quantity; applied to every Greek.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.position.sign() * self.quantity
    }

    /// Copy with a different strike.
    #[inline]
    pub fn with_strike(self, strike: f64) -> Self {
        Self { strike, ..self }
    }

    /// Copy with a different time to maturity.
    #[inline]
    pub fn with_maturity(self, time_to_maturity: f64) -> Self {
        Self {
            time_to_maturity,
            ..self
        }
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a different risk-free rate.
    #[inline]
    pub fn with_rate(self, risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..self
        }
    }

    /// Copy with a different dividend yield.
    #[inline]
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    /// Copy with a different option type.
    #[inline]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Copy with a different position.
    #[inline]
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Copy with a different quantity.
    #[inline]
    pub fn with_quantity(self, quantity: f64) -> Self {
        Self { quantity, ..self }
    }

    /// Copy with a different barrier.
    #[inline]
    pub fn with_barrier(self, barrier_type: BarrierType, barrier_level: f64) -> Self {
        Self {
            barrier_type,
            barrier_level,
            ..self
        }
    }

    /// Copy of the same option without its barrier.
    #[inline]
    pub fn without_barrier(self) -> Self {
        Self {
            barrier_type: BarrierType::None,
            ..self
        }
    }

    /// Caller-side range validation.
    ///
    /// The pricing functions accept any input and resolve degenerate values
    /// themselves; this is for front ends that want to reject bad input
    /// before pricing.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the strike is not positive, the
    /// quantity is negative, any market input is not finite, or a barrier is
    /// configured with a non-positive level.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "quantity must be non-negative, got {}",
                self.quantity
            )));
        }

        let market = [
            ("time to maturity", self.time_to_maturity),
            ("volatility", self.volatility),
            ("risk-free rate", self.risk_free_rate),
            ("dividend yield", self.dividend_yield),
        ];
        for (name, value) in market {
            if !value.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.has_barrier() && (!self.barrier_level.is_finite() || self.barrier_level <= 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "{} barrier requires a positive level, got {}",
                self.barrier_type, self.barrier_level
            )));
        }

        Ok(())
    }
}

/// Builder for [`OptionParams`].
#[derive(Clone, Debug, Default)]
pub struct OptionParamsBuilder {
    params: OptionParams,
}

impl OptionParamsBuilder {
    /// Sets the strike.
    pub fn strike(mut self, strike: f64) -> Self {
        self.params.strike = strike;
        self
    }

    /// Sets the time to maturity in years.
    pub fn time_to_maturity(mut self, time_to_maturity: f64) -> Self {
        self.params.time_to_maturity = time_to_maturity;
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.params.volatility = volatility;
        self
    }

    /// Sets the risk-free rate.
    pub fn risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.params.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the dividend yield.
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.params.dividend_yield = dividend_yield;
        self
    }

    /// Sets the option type.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.params.option_type = option_type;
        self
    }

    /// Sets the position.
    pub fn position(mut self, position: Position) -> Self {
        self.params.position = position;
        self
    }

    /// Sets the quantity.
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.params.quantity = quantity;
        self
    }

    /// Sets the barrier type and level.
    pub fn barrier(mut self, barrier_type: BarrierType, barrier_level: f64) -> Self {
        self.params.barrier_type = barrier_type;
        self.params.barrier_level = barrier_level;
        self
    }

    /// Builds the parameters without validation.
    pub fn build(self) -> OptionParams {
        self.params
    }
}
