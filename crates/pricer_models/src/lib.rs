//! # Pricer Models (L2: Business Logic)
//!
//! European option pricing under Black-Scholes-Merton dynamics with a
//! continuous dividend yield.
//!
//! This crate provides:
//! - Option parameters with single-field replacement for bump-and-revalue
//! - Closed-form vanilla prices and Greeks up to third order
//! - Closed-form single-barrier prices (up/down, in/out)
//! - Finite-difference Greeks for barrier options
//! - Multi-leg strategies, spot profiles and sensitivity surfaces
//!
//! ## Design Principles
//!
//! - **Total pricing functions**: degenerate inputs resolve to intrinsic values
//! - **Immutable inputs**: [`instruments::OptionParams`] is `Copy`; bumps build
//!   new values instead of mutating
//! - **Builder pattern** for ergonomic API with sensible defaults
//!
//! ## Example
//!
//! ```
//! use pricer_models::greeks::calculate;
//! use pricer_models::instruments::OptionParams;
//! use pricer_core::types::BarrierType;
//!
//! let params = OptionParams::builder()
//!     .strike(100.0)
//!     .barrier(BarrierType::UpOut, 120.0)
//!     .build();
//! let greeks = calculate(100.0, &params);
//! assert!(greeks.price > 0.0 && greeks.price < 10.4506);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod greeks;
pub mod instruments;
pub mod strategy;
