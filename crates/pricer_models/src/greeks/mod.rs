//! Greeks calculation types, configuration and dispatch.
//!
//! This module provides:
//! - [`Greeks`]: Fourteen-field price and sensitivity record
//! - [`GreekMetric`]: Selects one field of [`Greeks`] by name
//! - [`BumpConfig`]: Bump widths for finite-difference Greeks
//! - [`calculate`]: Vanilla closed form or barrier bump-and-revalue, scaled
//!   by position and quantity

mod config;
mod engine;
mod result;

pub use config::{BumpConfig, BumpConfigBuilder, BumpConfigError};
pub use engine::{calculate, calculate_with_config};
pub use result::{GreekMetric, Greeks};
