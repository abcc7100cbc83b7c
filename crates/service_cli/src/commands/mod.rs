//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. The argument groups
//! shared between commands live here.

use std::path::{Path, PathBuf};

use clap::Args;
use pricer_core::types::{BarrierType, OptionType, Position};
use pricer_models::strategy::{Leg, MarketEnv, Strategy, StructuredProduct};
use tracing::debug;

use crate::{CliError, Result};

pub mod price;
pub mod profile;
pub mod surface;

/// Market overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct MarketArgs {
    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Annualised volatility (0.2 = 20%)
    #[arg(short = 'v', long)]
    pub volatility: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(short = 'r', long)]
    pub rate: Option<f64>,

    /// Continuous dividend yield
    #[arg(short = 'q', long)]
    pub dividend_yield: Option<f64>,
}

/// Spot grid overrides for profile and surface
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Lowest spot
    #[arg(long)]
    pub min: Option<f64>,

    /// Highest spot
    #[arg(long)]
    pub max: Option<f64>,

    /// Number of points
    #[arg(long)]
    pub steps: Option<usize>,
}

/// Which legs to value: a leg file, a preset, or a single option
#[derive(Args, Debug, Clone)]
pub struct LegArgs {
    /// JSON file holding an array of legs
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub legs: Option<PathBuf>,

    /// Structured product preset (straddle, strangle, bull_call, bear_put, iron_condor)
    #[arg(long)]
    pub preset: Option<StructuredProduct>,

    /// Strike, or the centre strike of a preset
    #[arg(short = 'k', long, default_value_t = 100.0)]
    pub strike: f64,

    /// Option type (call, put)
    #[arg(long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Position (long, short, 1, -1)
    #[arg(long, default_value = "long", allow_hyphen_values = true)]
    pub position: Position,

    /// Number of contracts
    #[arg(long, default_value_t = 1.0)]
    pub quantity: f64,

    /// Barrier type (none, up-out, down-out, up-in, down-in)
    #[arg(long, default_value = "none")]
    pub barrier_type: BarrierType,

    /// Barrier level
    #[arg(long, default_value_t = 0.0)]
    pub barrier_level: f64,
}

impl Default for LegArgs {
    fn default() -> Self {
        Self {
            legs: None,
            preset: None,
            strike: 100.0,
            option_type: OptionType::Call,
            position: Position::Long,
            quantity: 1.0,
            barrier_type: BarrierType::None,
            barrier_level: 0.0,
        }
    }
}

impl LegArgs {
    /// Builds the strategy described by the arguments.
    pub fn strategy(&self) -> Result<Strategy> {
        if let Some(path) = &self.legs {
            return load_legs(path);
        }
        if let Some(preset) = self.preset {
            debug!(%preset, strike = self.strike, "using preset");
            return Ok(preset.strategy(self.strike));
        }

        let leg = Leg::new(self.option_type, self.strike);
        let leg = Leg {
            position: self.position,
            quantity: self.quantity,
            ..leg
        }
        .with_barrier(self.barrier_type, self.barrier_level);
        Ok(Strategy::new(vec![leg]))
    }
}

/// Reads a JSON array of legs.
fn load_legs(path: &Path) -> Result<Strategy> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let strategy: Strategy = serde_json::from_str(&content)?;
    debug!(path = %path.display(), legs = strategy.legs.len(), "loaded leg file");
    Ok(strategy)
}

/// Rejects empty or invalid strategies before pricing.
pub fn validated(strategy: Strategy, market: &MarketEnv) -> Result<Strategy> {
    if strategy.is_empty() {
        return Err(CliError::InvalidArgument("no legs to value".to_string()));
    }
    strategy.validate(market)?;
    Ok(strategy)
}
