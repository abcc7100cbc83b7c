//! Finite-difference bump configuration.
//!
//! Provides [`BumpConfig`], the bump widths used when Greeks of barrier
//! options are obtained by bump-and-revalue.

use thiserror::Error;

/// Bump widths for finite-difference Greeks.
///
/// Use the builder pattern via [`BumpConfig::builder()`] for construction.
///
/// # Default Values
///
/// | Parameter | Default | Used for |
/// |-----------|---------|----------|
/// | `spot_bump_relative` | 0.001 | delta, gamma, zomma, color, vanna |
/// | `spot_bump_floor` | 1e-4 | minimum absolute spot bump |
/// | `speed_bump_relative` | 0.002 | speed |
/// | `speed_bump_floor` | 2e-4 | minimum absolute speed bump |
/// | `time_bump_years` | 1/365 | theta, color (one calendar day) |
/// | `vol_bump` | 0.001 | vega, volga, zomma, vanna |
/// | `ultima_vol_bump` | 0.002 | ultima |
/// | `rate_bump` | 1e-4 | rho (one basis point) |
///
/// # Examples
///
/// ```rust
/// use pricer_models::greeks::BumpConfig;
///
/// // Use defaults
/// let config = BumpConfig::default();
/// assert!((config.spot_bump(100.0) - 0.1).abs() < 1e-12);
///
/// // Use builder for custom values
/// let config = BumpConfig::builder()
///     .vol_bump(0.0005)
///     .build()
///     .unwrap();
/// assert_eq!(config.vol_bump, 0.0005);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BumpConfig {
    /// Relative spot bump; the absolute bump is `max(relative * S, floor)`.
    pub spot_bump_relative: f64,
    /// Absolute floor for the spot bump.
    pub spot_bump_floor: f64,
    /// Relative spot bump for the four-point speed stencil.
    pub speed_bump_relative: f64,
    /// Absolute floor for the speed bump.
    pub speed_bump_floor: f64,
    /// Time bump in years, applied backwards (T - dT).
    pub time_bump_years: f64,
    /// Absolute volatility bump.
    pub vol_bump: f64,
    /// Absolute volatility bump for the four-point ultima stencil.
    pub ultima_vol_bump: f64,
    /// Absolute rate bump.
    pub rate_bump: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            spot_bump_relative: 0.001,
            spot_bump_floor: 1e-4,
            speed_bump_relative: 0.002,
            speed_bump_floor: 2e-4,
            time_bump_years: 1.0 / 365.0,
            vol_bump: 0.001,
            ultima_vol_bump: 0.002,
            rate_bump: 1e-4,
        }
    }
}

impl BumpConfig {
    /// Creates a new builder for constructing a `BumpConfig`.
    pub fn builder() -> BumpConfigBuilder {
        BumpConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Every bump must be positive and finite. Relative spot bumps are
    /// capped at 10%, time bumps at one year, volatility bumps at 0.1 and
    /// rate bumps at 0.01.
    pub fn validate(&self) -> Result<(), BumpConfigError> {
        let spot = [
            ("spot_bump_relative", self.spot_bump_relative, 0.1),
            ("speed_bump_relative", self.speed_bump_relative, 0.1),
        ];
        for (name, value, max) in spot {
            check(value, max).map_err(|msg| BumpConfigError::InvalidSpotBump(format!("{name} {msg}")))?;
        }
        let floors = [
            ("spot_bump_floor", self.spot_bump_floor),
            ("speed_bump_floor", self.speed_bump_floor),
        ];
        for (name, value) in floors {
            check(value, f64::MAX).map_err(|msg| BumpConfigError::InvalidSpotBump(format!("{name} {msg}")))?;
        }

        check(self.time_bump_years, 1.0)
            .map_err(|msg| BumpConfigError::InvalidTimeBump(format!("time_bump_years {msg}")))?;

        let vol = [
            ("vol_bump", self.vol_bump),
            ("ultima_vol_bump", self.ultima_vol_bump),
        ];
        for (name, value) in vol {
            check(value, 0.1).map_err(|msg| BumpConfigError::InvalidVolBump(format!("{name} {msg}")))?;
        }

        check(self.rate_bump, 0.01)
            .map_err(|msg| BumpConfigError::InvalidRateBump(format!("rate_bump {msg}")))?;

        Ok(())
    }

    /// Absolute spot bump for delta and gamma at `spot`.
    ///
    /// ```rust
    /// use pricer_models::greeks::BumpConfig;
    ///
    /// let config = BumpConfig::default();
    /// assert!((config.spot_bump(100.0) - 0.1).abs() < 1e-12);
    /// assert_eq!(config.spot_bump(0.01), 1e-4); // floor
    /// ```
    #[inline]
    pub fn spot_bump(&self, spot: f64) -> f64 {
        (self.spot_bump_relative * spot).max(self.spot_bump_floor)
    }

    /// Absolute spot bump for speed at `spot`.
    #[inline]
    pub fn speed_bump(&self, spot: f64) -> f64 {
        (self.speed_bump_relative * spot).max(self.speed_bump_floor)
    }
}

fn check(value: f64, max: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("must be positive, got {value}"));
    }
    if value > max {
        return Err(format!("must be <= {max}, got {value}"));
    }
    Ok(())
}

/// Builder for [`BumpConfig`].
///
/// Unset fields take their default values.
#[derive(Debug, Default)]
pub struct BumpConfigBuilder {
    spot_bump_relative: Option<f64>,
    spot_bump_floor: Option<f64>,
    speed_bump_relative: Option<f64>,
    speed_bump_floor: Option<f64>,
    time_bump_years: Option<f64>,
    vol_bump: Option<f64>,
    ultima_vol_bump: Option<f64>,
    rate_bump: Option<f64>,
}

impl BumpConfigBuilder {
    /// Sets the relative spot bump (default: 0.001).
    pub fn spot_bump_relative(mut self, bump: f64) -> Self {
        self.spot_bump_relative = Some(bump);
        self
    }

    /// Sets the spot bump floor (default: 1e-4).
    pub fn spot_bump_floor(mut self, floor: f64) -> Self {
        self.spot_bump_floor = Some(floor);
        self
    }

    /// Sets the relative speed bump (default: 0.002).
    pub fn speed_bump_relative(mut self, bump: f64) -> Self {
        self.speed_bump_relative = Some(bump);
        self
    }

    /// Sets the speed bump floor (default: 2e-4).
    pub fn speed_bump_floor(mut self, floor: f64) -> Self {
        self.speed_bump_floor = Some(floor);
        self
    }

    /// Sets the time bump in years (default: 1/365).
    pub fn time_bump_years(mut self, bump: f64) -> Self {
        self.time_bump_years = Some(bump);
        self
    }

    /// Sets the volatility bump (default: 0.001).
    pub fn vol_bump(mut self, bump: f64) -> Self {
        self.vol_bump = Some(bump);
        self
    }

    /// Sets the ultima volatility bump (default: 0.002).
    pub fn ultima_vol_bump(mut self, bump: f64) -> Self {
        self.ultima_vol_bump = Some(bump);
        self
    }

    /// Sets the rate bump (default: 1e-4).
    pub fn rate_bump(mut self, bump: f64) -> Self {
        self.rate_bump = Some(bump);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BumpConfigError`] if any bump is invalid.
    pub fn build(self) -> Result<BumpConfig, BumpConfigError> {
        let defaults = BumpConfig::default();
        let config = BumpConfig {
            spot_bump_relative: self.spot_bump_relative.unwrap_or(defaults.spot_bump_relative),
            spot_bump_floor: self.spot_bump_floor.unwrap_or(defaults.spot_bump_floor),
            speed_bump_relative: self.speed_bump_relative.unwrap_or(defaults.speed_bump_relative),
            speed_bump_floor: self.speed_bump_floor.unwrap_or(defaults.speed_bump_floor),
            time_bump_years: self.time_bump_years.unwrap_or(defaults.time_bump_years),
            vol_bump: self.vol_bump.unwrap_or(defaults.vol_bump),
            ultima_vol_bump: self.ultima_vol_bump.unwrap_or(defaults.ultima_vol_bump),
            rate_bump: self.rate_bump.unwrap_or(defaults.rate_bump),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Error type for [`BumpConfig`] validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[allow(clippy::enum_variant_names)]
pub enum BumpConfigError {
    /// Invalid spot or speed bump.
    #[error("Invalid spot bump: {0}")]
    InvalidSpotBump(String),
    /// Invalid time bump.
    #[error("Invalid time bump: {0}")]
    InvalidTimeBump(String),
    /// Invalid volatility bump.
    #[error("Invalid vol bump: {0}")]
    InvalidVolBump(String),
    /// Invalid rate bump.
    #[error("Invalid rate bump: {0}")]
    InvalidRateBump(String),
}
