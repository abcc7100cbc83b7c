//! Price command implementation
//!
//! Prices a single option or a strategy at one spot and prints all fourteen
//! Greeks.

use std::io::Write;

use clap::Args;
use tracing::info;

use super::{validated, LegArgs, MarketArgs};
use crate::config::AppConfig;
use crate::output::{write_greeks, OutputFormat};
use crate::{CliError, Result};

/// Arguments of `greeks price`
#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
    /// Spot price of the underlying
    #[arg(short, long, default_value_t = 100.0)]
    pub spot: f64,

    #[command(flatten)]
    pub legs: LegArgs,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Run the price command
pub fn run<W: Write>(args: &PriceArgs, config: &AppConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    if !(args.spot.is_finite() && args.spot > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "spot must be positive, got {}",
            args.spot
        )));
    }

    let strategy = validated(args.legs.strategy()?, &config.market)?;
    info!(spot = args.spot, legs = strategy.legs.len(), "Starting pricing");

    let greeks = strategy.greeks_at(args.spot, &config.market, &config.bumps);
    write_greeks(out, format, &greeks)?;

    info!(price = greeks.price, "Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::BarrierType;

    fn args() -> PriceArgs {
        PriceArgs {
            spot: 100.0,
            legs: LegArgs::default(),
            market: MarketArgs::default(),
        }
    }

    #[test]
    fn test_price_default_call_json() {
        let mut buf = Vec::new();
        run(&args(), &AppConfig::default(), OutputFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_relative_eq!(value["price"].as_f64().unwrap(), 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(value["delta"].as_f64().unwrap(), 0.6368306511756191, epsilon = 1e-9);
    }

    #[test]
    fn test_price_rejects_bad_spot() {
        let mut buf = Vec::new();
        let bad = PriceArgs { spot: -1.0, ..args() };
        let result = run(&bad, &AppConfig::default(), OutputFormat::Table, &mut buf);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_price_rejects_barrier_without_level() {
        let mut buf = Vec::new();
        let mut bad = args();
        bad.legs.barrier_type = BarrierType::UpOut;
        let result = run(&bad, &AppConfig::default(), OutputFormat::Table, &mut buf);
        assert!(matches!(result, Err(CliError::Pricing(_))));
    }
}
