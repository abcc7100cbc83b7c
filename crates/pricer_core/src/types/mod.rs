//! Option enumerations and error types.
//!
//! This module provides:
//! - `option`: [`OptionType`] and [`Position`] with boundary token normalisation
//! - `barrier`: [`BarrierType`], [`BarrierDirection`] and [`KnockType`]
//! - `error`: Structured error types for token parsing and input validation

pub mod barrier;
pub mod error;
pub mod option;

// Re-export commonly used types at module level
pub use barrier::{BarrierDirection, BarrierType, KnockType};
pub use error::{PricingError, TokenKind};
pub use option::{OptionType, Position};
