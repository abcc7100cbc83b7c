//! CLI error types

use pricer_core::types::PricingError;
use pricer_models::greeks::BumpConfigError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced to the user by the `greeks` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Option or strategy input rejected
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Finite-difference bumps rejected
    #[error("Bump configuration error: {0}")]
    Bumps(#[from] BumpConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid combination of arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Leg file could not be parsed, or JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::TokenKind;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("legs.json".to_string());
        assert_eq!(err.to_string(), "File not found: legs.json");

        let err: CliError = PricingError::unknown_token(TokenKind::BarrierType, "Sideways").into();
        assert_eq!(
            err.to_string(),
            "Pricing error: Unknown barrier type token: 'Sideways'"
        );

        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error: Invalid log level"));
    }
}
