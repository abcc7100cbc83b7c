//! Greeks CLI - option pricing and sensitivity analysis
//!
//! Command-line front end for the Black-Scholes-Merton pricing models.
//!
//! # Commands
//!
//! - `greeks price` - Price one option or strategy at a single spot
//! - `greeks profile` - Greeks across a spot grid
//! - `greeks surface` - One Greek over spot and a market variable
//!
//! Results go to stdout as a table, JSON or CSV; logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::{GridArgs, MarketArgs};
use config::{build_config, CliArgs, LogLevel};
use output::OutputFormat;

/// Black-Scholes-Merton option Greeks
#[derive(Parser)]
#[command(name = "greeks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option or strategy at one spot
    Price(commands::price::PriceArgs),

    /// Greeks across a range of spots
    Profile(commands::profile::ProfileArgs),

    /// One Greek over spot and a market variable
    Surface(commands::surface::SurfaceArgs),
}

impl Cli {
    /// Configuration overrides carried by the command line.
    fn config_args(&self) -> CliArgs {
        let (market, grid, steps) = match &self.command {
            Commands::Price(args) => (&args.market, None, None),
            Commands::Profile(args) => (&args.market, Some(&args.grid), args.grid.steps),
            // Surface resolution is applied by the command itself
            Commands::Surface(args) => (&args.market, Some(&args.grid), None),
        };
        let MarketArgs {
            maturity,
            volatility,
            rate,
            dividend_yield,
        } = market.clone();
        let (spot_min, spot_max) = grid.map_or((None, None), |g: &GridArgs| (g.min, g.max));

        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            maturity,
            volatility,
            rate,
            dividend_yield,
            spot_min,
            spot_max,
            steps,
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(&cli.config_args())?;
    init_tracing(config.log_level);
    debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config, cli.format, &mut out)?,
        Commands::Profile(args) => commands::profile::run(args, &config, cli.format, &mut out)?,
        Commands::Surface(args) => commands::surface::run(args, &config, cli.format, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_price_overrides() {
        let cli = Cli::parse_from([
            "greeks", "price", "-s", "105", "-k", "100", "--type", "put", "-v", "0.3", "-t", "0.5", "--verbose",
        ]);
        let args = cli.config_args();
        assert_eq!(args.volatility, Some(0.3));
        assert_eq!(args.maturity, Some(0.5));
        assert_eq!(args.steps, None);
        assert!(args.verbose);
    }

    #[test]
    fn test_surface_steps_stay_local() {
        let cli = Cli::parse_from([
            "greeks", "--format", "csv", "surface", "--metric", "vega", "--variable", "v", "--steps", "10", "--min", "80",
        ]);
        assert_eq!(cli.format, OutputFormat::Csv);
        let args = cli.config_args();
        assert_eq!(args.steps, None);
        assert_eq!(args.spot_min, Some(80.0));
    }

    #[test]
    fn test_profile_grid_overrides() {
        let cli = Cli::parse_from(["greeks", "profile", "--preset", "iron-condor", "--steps", "25", "--max", "140"]);
        let args = cli.config_args();
        assert_eq!(args.steps, Some(25));
        assert_eq!(args.spot_max, Some(140.0));
    }
}
