//! CLI configuration management
//!
//! Handles loading configuration from TOML files, `GREEKS_*` environment
//! variables, and command-line flags.

use pricer_models::greeks::{BumpConfig, BumpConfigError};
use pricer_models::strategy::{MarketEnv, SpotGrid};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Market inputs out of range
    #[error("Invalid market: {0}")]
    InvalidMarket(String),

    /// Spot grid out of range
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Bump widths out of range
    #[error("Invalid bumps: {0}")]
    InvalidBumps(#[from] BumpConfigError),

    /// Configuration file missing or malformed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every pricing call
    Trace,
    /// Grid and configuration detail
    Debug,
    /// Progress messages
    Info,
    /// Warnings only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Environment variable names, in one place
pub mod env_vars {
    /// Log level
    pub const LOG_LEVEL: &str = "GREEKS_LOG_LEVEL";
    /// Time to maturity in years
    pub const MATURITY: &str = "GREEKS_MATURITY";
    /// Volatility
    pub const VOLATILITY: &str = "GREEKS_VOLATILITY";
    /// Risk-free rate
    pub const RATE: &str = "GREEKS_RATE";
    /// Dividend yield
    pub const DIVIDEND_YIELD: &str = "GREEKS_DIVIDEND_YIELD";
    /// Lowest spot of the grid
    pub const SPOT_MIN: &str = "GREEKS_SPOT_MIN";
    /// Highest spot of the grid
    pub const SPOT_MAX: &str = "GREEKS_SPOT_MAX";
    /// Number of grid points
    pub const STEPS: &str = "GREEKS_STEPS";
}

/// Application configuration
///
/// ```toml
/// log_level = "info"
///
/// [market]
/// time_to_maturity = 0.5
/// volatility = 0.25
///
/// [grid]
/// min = 80.0
/// max = 120.0
/// steps = 41
///
/// [bumps]
/// vol_bump = 0.0005
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Shared market inputs
    pub market: MarketEnv,
    /// Spot grid for profiles and surfaces
    pub grid: SpotGrid,
    /// Finite-difference bump widths
    pub bumps: BumpConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override fields from `lookup`, which maps a variable name to its value
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(env_vars::LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        let floats = [
            (env_vars::MATURITY, &mut self.market.time_to_maturity),
            (env_vars::VOLATILITY, &mut self.market.volatility),
            (env_vars::RATE, &mut self.market.risk_free_rate),
            (env_vars::DIVIDEND_YIELD, &mut self.market.dividend_yield),
            (env_vars::SPOT_MIN, &mut self.grid.min),
            (env_vars::SPOT_MAX, &mut self.grid.max),
        ];
        for (key, field) in floats {
            if let Some(value) = lookup(key) {
                *field = parse_env(key, &value)?;
            }
        }

        if let Some(value) = lookup(env_vars::STEPS) {
            self.grid.steps = parse_env(env_vars::STEPS, &value)?;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }

        let market = &mut self.market;
        let overrides = [
            (cli.maturity, &mut market.time_to_maturity),
            (cli.volatility, &mut market.volatility),
            (cli.rate, &mut market.risk_free_rate),
            (cli.dividend_yield, &mut market.dividend_yield),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(min) = cli.spot_min {
            self.grid.min = min;
        }
        if let Some(max) = cli.spot_max {
            self.grid.max = max;
        }
        if let Some(steps) = cli.steps {
            self.grid.steps = steps;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.market;
        let finite = [
            ("time_to_maturity", m.time_to_maturity),
            ("volatility", m.volatility),
            ("risk_free_rate", m.risk_free_rate),
            ("dividend_yield", m.dividend_yield),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::InvalidMarket(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if m.time_to_maturity < 0.0 || m.volatility < 0.0 {
            return Err(ConfigError::InvalidMarket(
                "time_to_maturity and volatility must be non-negative".to_string(),
            ));
        }

        let g = &self.grid;
        if !(g.min.is_finite() && g.min > 0.0) {
            return Err(ConfigError::InvalidGrid(format!(
                "min must be positive, got {}",
                g.min
            )));
        }
        if !(g.max.is_finite() && g.max > g.min) {
            return Err(ConfigError::InvalidGrid(format!(
                "max ({}) must exceed min ({})",
                g.max, g.min
            )));
        }

        self.bumps.validate()?;
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid number", key, value)))
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Debug logging unless a level is given
    pub verbose: bool,
    /// Time to maturity override
    pub maturity: Option<f64>,
    /// Volatility override
    pub volatility: Option<f64>,
    /// Risk-free rate override
    pub rate: Option<f64>,
    /// Dividend yield override
    pub dividend_yield: Option<f64>,
    /// Grid minimum override
    pub spot_min: Option<f64>,
    /// Grid maximum override
    pub spot_max: Option<f64>,
    /// Grid size override
    pub steps: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.market, MarketEnv::default());
        assert_eq!(config.grid, SpotGrid::default());
        assert_eq!(config.bumps, BumpConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"

            [market]
            time_to_maturity = 0.5
            volatility = 0.25
            risk_free_rate = 0.03
            dividend_yield = 0.01

            [grid]
            min = 80.0
            max = 120.0
            steps = 41

            [bumps]
            vol_bump = 0.0005
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.market.time_to_maturity, 0.5);
        assert_eq!(config.market.dividend_yield, 0.01);
        assert_eq!(config.grid, SpotGrid::new(80.0, 120.0, 41));
        assert_eq!(config.bumps.vol_bump, 0.0005);
        assert_eq!(config.bumps.rate_bump, BumpConfig::default().rate_bump);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = AppConfig::from_toml("[market]\nvolatility = 0.3\n").unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.market.volatility, 0.3);
        assert_eq!(config.market.time_to_maturity, 1.0);
        assert_eq!(config.grid, SpotGrid::default());
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_toml_rejects_bad_log_level() {
        let result = AppConfig::from_toml("log_level = \"loud\"");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_with(env(&[
                ("GREEKS_LOG_LEVEL", "info"),
                ("GREEKS_VOLATILITY", "0.35"),
                ("GREEKS_SPOT_MAX", "200"),
                ("GREEKS_STEPS", " 11 "),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.market.volatility, 0.35);
        assert_eq!(config.market.risk_free_rate, 0.05);
        assert_eq!(config.grid.max, 200.0);
        assert_eq!(config.grid.steps, 11);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = AppConfig::default();
        let result = config.apply_env_with(env(&[("GREEKS_RATE", "five percent")]));
        match result {
            Err(ConfigError::EnvError(msg)) => assert!(msg.contains("GREEKS_RATE")),
            other => panic!("Expected EnvError, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            log_level: Some("error".to_string()),
            verbose: true,
            maturity: Some(0.25),
            spot_min: Some(90.0),
            steps: Some(5),
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        // Explicit level wins over --verbose
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.market.time_to_maturity, 0.25);
        assert_eq!(config.market.volatility, 0.20);
        assert_eq!(config.grid.min, 90.0);
        assert_eq!(config.grid.steps, 5);
    }

    #[test]
    fn test_verbose_means_debug() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_priority_cli_over_env() {
        let cli = CliArgs {
            volatility: Some(0.4),
            ..Default::default()
        };
        let config = build_config_with(
            &cli,
            env(&[("GREEKS_VOLATILITY", "0.3"), ("GREEKS_RATE", "0.02")]),
        )
        .unwrap();

        assert_eq!(config.market.volatility, 0.4);
        assert_eq!(config.market.risk_free_rate, 0.02);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with(&CliArgs::default(), env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/greeks.toml")),
            ..Default::default()
        };
        let result = build_config_with(&cli, env(&[]));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        config.grid.min = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid(_))));

        let mut config = AppConfig::default();
        config.grid.max = 40.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid(_))));

        let mut config = AppConfig::default();
        config.market.volatility = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMarket(_))));

        let mut config = AppConfig::default();
        config.bumps.vol_bump = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBumps(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidGrid("max (1) must exceed min (2)".to_string());
        assert_eq!(err.to_string(), "Invalid grid: max (1) must exceed min (2)");
    }
}
