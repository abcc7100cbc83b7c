//! Option type and position direction.
//!
//! Both enumerations accept string tokens at the boundary in two ways:
//! - [`OptionType::from_token`] / [`Position::from_token`]: permissive, any
//!   unrecognised token falls through to `Put` / `Long`
//! - `FromStr`: strict, unrecognised tokens are a [`PricingError`]
//!
//! Matching is ASCII case-insensitive in both forms. The strict form accepts
//! exactly `call`/`put` for [`OptionType`] and `long`/`1`/`+1` or
//! `short`/`-1` for [`Position`].

use std::fmt;
use std::str::FromStr;

use super::error::{PricingError, TokenKind};

/// Option type (call or put).
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!(OptionType::from_token("call"), OptionType::Call);
/// assert_eq!(OptionType::from_token("anything"), OptionType::Put);
/// assert!("anything".parse::<OptionType>().is_err());
/// assert_eq!(OptionType::Put.phi(), -1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum OptionType {
    /// Call option
    #[default]
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// Permissive token normalisation: `"call"` in any case is a call,
    /// everything else is a put.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("call") {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// Sign used by the closed-form formulas: +1 for calls, -1 for puts.
    #[inline]
    pub fn phi(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Intrinsic value at `spot` for `strike`.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Canonical token.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::unknown_token(TokenKind::OptionType, s)),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionType> for String {
    fn from(value: OptionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position direction (long or short).
///
/// # Examples
/// ```
/// use pricer_core::types::Position;
///
/// assert_eq!(Position::from_token("short"), Position::Short);
/// assert_eq!(Position::from_token("-1"), Position::Short);
/// assert_eq!(Position::from_token("whatever"), Position::Long);
/// assert_eq!(Position::Short.sign(), -1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Position {
    /// Long position (bought)
    #[default]
    Long,
    /// Short position (sold)
    Short,
}

impl Position {
    /// Permissive token normalisation: `"short"` in any case or `"-1"` is
    /// short, everything else is long.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("short") || token == "-1" {
            Position::Short
        } else {
            Position::Long
        }
    }

    /// Multiplier applied to every Greek: +1 long, -1 short.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }

    /// Canonical token.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Long => "Long",
            Position::Short => "Short",
        }
    }
}

impl FromStr for Position {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "1" | "+1" => Ok(Position::Long),
            "short" | "-1" => Ok(Position::Short),
            _ => Err(PricingError::unknown_token(TokenKind::Position, s)),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
