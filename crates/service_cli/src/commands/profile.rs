//! Profile command implementation
//!
//! Evaluates a strategy across the configured spot grid.

use std::io::Write;

use clap::Args;
use pricer_models::strategy::spot_profile;
use tracing::info;

use super::{validated, GridArgs, LegArgs, MarketArgs};
use crate::config::AppConfig;
use crate::output::{write_profile, OutputFormat};
use crate::Result;

/// Arguments of `greeks profile`
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub legs: LegArgs,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Run the profile command
pub fn run<W: Write>(args: &ProfileArgs, config: &AppConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    let strategy = validated(args.legs.strategy()?, &config.market)?;
    info!(
        legs = strategy.legs.len(),
        min = config.grid.min,
        max = config.grid.max,
        steps = config.grid.steps,
        "Starting spot profile"
    );

    let profile = spot_profile(&strategy, &config.market, &config.grid, &config.bumps);
    write_profile(out, format, &profile)?;

    info!(points = profile.len(), "Profile complete");
    Ok(())
}
