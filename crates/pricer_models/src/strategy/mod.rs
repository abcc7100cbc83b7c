//! Multi-leg strategies and their aggregated Greeks.
//!
//! This module provides:
//! - [`Strategy`], [`Leg`] and [`MarketEnv`]: legs priced in one shared market
//! - [`StructuredProduct`]: straddle, strangle, spreads and iron condor presets
//! - [`spot_profile`]: Greeks across a [`SpotGrid`]
//! - [`sensitivity_surface`]: one Greek over spot × [`MarketVariable`]
//!
//! Grid evaluation is parallelised with Rayon; every point is independent.

mod leg;
mod presets;
mod profile;
mod surface;

pub use leg::{Leg, MarketEnv, Strategy};
pub use presets::{StructuredProduct, STRIKE_SPACING};
pub use profile::{linspace, spot_profile, ProfilePoint, SpotGrid};
pub use surface::{sensitivity_surface, MarketVariable, Surface, SURFACE_RESOLUTION};
