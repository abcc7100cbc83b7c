//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from token parsing and input validation
//! - `TokenKind`: Which boundary field a rejected token belonged to
//!
//! The pricing functions themselves are total and never return these errors;
//! they are raised at the boundary where strings and user input enter.

use std::fmt;
use thiserror::Error;

/// Boundary field a string token was parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Option type (`Call` / `Put`)
    OptionType,
    /// Position direction (`Long` / `Short`)
    Position,
    /// Barrier type (`None`, `UpOut`, `DownOut`, `UpIn`, `DownIn`)
    BarrierType,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::OptionType => write!(f, "option type"),
            TokenKind::Position => write!(f, "position"),
            TokenKind::BarrierType => write!(f, "barrier type"),
        }
    }
}

/// Categorised pricing errors.
///
/// # Variants
/// - `UnknownToken`: A string token did not name any recognised variant
/// - `InvalidInput`: Parameter values rejected by caller-side validation
///
/// # Examples
/// ```
/// use pricer_core::types::{PricingError, TokenKind};
///
/// let err = PricingError::UnknownToken {
///     kind: TokenKind::BarrierType,
///     token: "Sideways".to_string(),
/// };
/// assert_eq!(format!("{}", err), "Unknown barrier type token: 'Sideways'");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Unrecognised string token for a closed enumeration.
    #[error("Unknown {kind} token: '{token}'")]
    UnknownToken {
        /// Field the token was parsed for
        kind: TokenKind,
        /// The rejected token
        token: String,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Shorthand for an [`PricingError::UnknownToken`] error.
    pub fn unknown_token(kind: TokenKind, token: &str) -> Self {
        PricingError::UnknownToken {
            kind,
            token: token.to_string(),
        }
    }
}
