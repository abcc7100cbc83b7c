//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions under Black-Scholes-Merton
//! dynamics with a continuous dividend yield:
//! - Vanilla calls and puts with closed-form Greeks up to third order
//! - Single-barrier knock-in and knock-out options (price only)
//!
//! ## Design Principles
//!
//! - **Total functions**: degenerate inputs (expired, zero volatility)
//!   resolve to intrinsic values instead of failing
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy in the tails

pub mod barrier;
pub mod black_scholes;
pub mod distributions;

pub use barrier::{barrier_price, BarrierTerms};
pub use black_scholes::{calculate_vanilla, vanilla_price};
pub use distributions::{ln_norm_cdf, norm_cdf, norm_pdf};
