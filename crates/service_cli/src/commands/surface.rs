//! Surface command implementation
//!
//! Samples one Greek over spot × one market variable.

use std::io::Write;

use clap::Args;
use pricer_models::greeks::GreekMetric;
use pricer_models::strategy::{linspace, sensitivity_surface, MarketVariable, SURFACE_RESOLUTION};
use tracing::info;

use super::{validated, GridArgs, LegArgs, MarketArgs};
use crate::config::AppConfig;
use crate::output::{write_surface, OutputFormat};
use crate::{CliError, Result};

/// Arguments of `greeks surface`
#[derive(Args, Debug, Clone)]
pub struct SurfaceArgs {
    /// Greek to sample (price, delta, gamma, ..., timeValue, ultima)
    #[arg(short, long, default_value = "delta")]
    pub metric: GreekMetric,

    /// Market variable on the second axis (t, v, r, q)
    #[arg(long, default_value = "timeToMaturity")]
    pub variable: MarketVariable,

    /// Lowest value of the market variable
    #[arg(long)]
    pub axis_min: Option<f64>,

    /// Highest value of the market variable
    #[arg(long)]
    pub axis_max: Option<f64>,

    #[command(flatten)]
    pub legs: LegArgs,

    #[command(flatten)]
    pub market: MarketArgs,

    /// Spot range; `--steps` sets the resolution of both axes
    #[command(flatten)]
    pub grid: GridArgs,
}

impl SurfaceArgs {
    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.grid.steps.unwrap_or(SURFACE_RESOLUTION)
    }
}

/// Run the surface command
pub fn run<W: Write>(args: &SurfaceArgs, config: &AppConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    let strategy = validated(args.legs.strategy()?, &config.market)?;

    let resolution = args.resolution();
    let (default_min, default_max) = args.variable.default_range(&config.market);
    let axis_min = args.axis_min.unwrap_or(default_min);
    let axis_max = args.axis_max.unwrap_or(default_max);
    if !(axis_min.is_finite() && axis_max.is_finite() && axis_max > axis_min) {
        return Err(CliError::InvalidArgument(format!(
            "{} axis must be increasing, got {}..{}",
            args.variable, axis_min, axis_max
        )));
    }

    let axis = linspace(axis_min, axis_max, resolution);
    let grid = config.grid.with_steps(resolution);

    info!(
        metric = %args.metric,
        variable = %args.variable,
        resolution,
        "Starting sensitivity surface"
    );

    let surface = sensitivity_surface(
        &strategy,
        &config.market,
        &grid,
        args.variable,
        &axis,
        args.metric,
        &config.bumps,
    );
    write_surface(out, format, &surface)?;

    info!("Surface complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SurfaceArgs {
        SurfaceArgs {
            metric: GreekMetric::Gamma,
            variable: MarketVariable::Volatility,
            axis_min: None,
            axis_max: None,
            legs: LegArgs::default(),
            market: MarketArgs::default(),
            grid: GridArgs {
                steps: Some(3),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_surface_json_shape() {
        let mut buf = Vec::new();
        run(&args(), &AppConfig::default(), OutputFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["metric"], "gamma");
        assert_eq!(value["variable"], "volatility");
        assert_eq!(value["axis"][0], 0.05);
        assert_eq!(value["axis"][2], 1.0);
        assert_eq!(value["spots"][1], 100.0);
        assert_eq!(value["values"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_default_resolution() {
        let surface_args = SurfaceArgs {
            grid: GridArgs::default(),
            ..args()
        };
        assert_eq!(surface_args.resolution(), 40);
    }

    #[test]
    fn test_rejects_inverted_axis() {
        let bad = SurfaceArgs {
            axis_min: Some(0.5),
            axis_max: Some(0.1),
            ..args()
        };
        let mut buf = Vec::new();
        let result = run(&bad, &AppConfig::default(), OutputFormat::Table, &mut buf);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
