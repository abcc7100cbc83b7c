//! Single-barrier definitions.
//!
//! There are four barrier styles, each applicable to calls and puts:
//! - **Up-and-Out / Down-and-Out**: the option dies when the barrier is touched
//! - **Up-and-In / Down-and-In**: the option comes alive when the barrier is touched
//!
//! **In-Out Parity**: Knock-In + Knock-Out = Vanilla

use std::fmt;
use std::str::FromStr;

use super::error::{PricingError, TokenKind};

/// Barrier option direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierDirection {
    /// Barrier is above the current spot price
    Up,
    /// Barrier is below the current spot price
    Down,
}

impl BarrierDirection {
    /// Sign η used by the reflected terms of the barrier formula:
    /// +1 for down barriers, -1 for up barriers.
    #[inline]
    pub fn eta(self) -> f64 {
        match self {
            BarrierDirection::Up => -1.0,
            BarrierDirection::Down => 1.0,
        }
    }

    /// Returns true when `spot` is at or beyond `barrier` on this side.
    #[inline]
    pub fn is_breached(self, spot: f64, barrier: f64) -> bool {
        match self {
            BarrierDirection::Up => spot >= barrier,
            BarrierDirection::Down => spot <= barrier,
        }
    }
}

/// Barrier option knock type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnockType {
    /// Option is activated (knocked in) when barrier is hit
    In,
    /// Option is deactivated (knocked out) when barrier is hit
    Out,
}

/// Barrier type of an option, `None` for vanilla options.
///
/// # Examples
/// ```
/// use pricer_core::types::{BarrierDirection, BarrierType, KnockType};
///
/// let bt: BarrierType = "UpOut".parse().unwrap();
/// assert_eq!(bt.direction(), Some(BarrierDirection::Up));
/// assert_eq!(bt.knock(), Some(KnockType::Out));
///
/// // Permissive form keeps the legacy fallthrough
/// assert_eq!(BarrierType::from_token("Sideways"), BarrierType::None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum BarrierType {
    /// No barrier (vanilla option)
    #[default]
    None,
    /// Up-and-Out
    UpOut,
    /// Down-and-Out
    DownOut,
    /// Up-and-In
    UpIn,
    /// Down-and-In
    DownIn,
}

impl BarrierType {
    /// All barrier types, vanilla first.
    pub const ALL: [BarrierType; 5] = [
        BarrierType::None,
        BarrierType::UpOut,
        BarrierType::DownOut,
        BarrierType::UpIn,
        BarrierType::DownIn,
    ];

    /// Builds a barrier type from its direction and knock type.
    pub fn new(direction: BarrierDirection, knock: KnockType) -> Self {
        match (direction, knock) {
            (BarrierDirection::Up, KnockType::Out) => BarrierType::UpOut,
            (BarrierDirection::Down, KnockType::Out) => BarrierType::DownOut,
            (BarrierDirection::Up, KnockType::In) => BarrierType::UpIn,
            (BarrierDirection::Down, KnockType::In) => BarrierType::DownIn,
        }
    }

    /// Permissive token normalisation: unrecognised tokens mean no barrier.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or(BarrierType::None)
    }

    /// Returns true unless this is [`BarrierType::None`].
    #[inline]
    pub fn is_barrier(self) -> bool {
        !matches!(self, BarrierType::None)
    }

    /// Barrier direction, `None` for vanilla options.
    #[inline]
    pub fn direction(self) -> Option<BarrierDirection> {
        match self {
            BarrierType::None => None,
            BarrierType::UpOut | BarrierType::UpIn => Some(BarrierDirection::Up),
            BarrierType::DownOut | BarrierType::DownIn => Some(BarrierDirection::Down),
        }
    }

    /// Knock type, `None` for vanilla options.
    #[inline]
    pub fn knock(self) -> Option<KnockType> {
        match self {
            BarrierType::None => None,
            BarrierType::UpOut | BarrierType::DownOut => Some(KnockType::Out),
            BarrierType::UpIn | BarrierType::DownIn => Some(KnockType::In),
        }
    }

    /// Whether the option pays off at `spot` given the barrier `level`.
    ///
    /// Out options are active until the barrier is breached, In options
    /// only once it is. Vanilla options are always active.
    pub fn is_active(self, spot: f64, level: f64) -> bool {
        match (self.direction(), self.knock()) {
            (Some(direction), Some(KnockType::Out)) => !direction.is_breached(spot, level),
            (Some(direction), Some(KnockType::In)) => direction.is_breached(spot, level),
            _ => true,
        }
    }

    /// Canonical token.
    pub fn as_str(self) -> &'static str {
        match self {
            BarrierType::None => "None",
            BarrierType::UpOut => "UpOut",
            BarrierType::DownOut => "DownOut",
            BarrierType::UpIn => "UpIn",
            BarrierType::DownIn => "DownIn",
        }
    }
}

impl FromStr for BarrierType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalised.as_str() {
            "" | "none" => Ok(BarrierType::None),
            "upout" | "upandout" => Ok(BarrierType::UpOut),
            "downout" | "downandout" => Ok(BarrierType::DownOut),
            "upin" | "upandin" => Ok(BarrierType::UpIn),
            "downin" | "downandin" => Ok(BarrierType::DownIn),
            _ => Err(PricingError::unknown_token(TokenKind::BarrierType, s)),
        }
    }
}

impl TryFrom<String> for BarrierType {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BarrierType> for String {
    fn from(value: BarrierType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
