//! Instrument definitions.
//!
//! This module provides [`OptionParams`], the single-option description
//! consumed by every pricer, and its builder.

pub mod params;

pub use params::{OptionParams, OptionParamsBuilder};
