//! # pricer_core: Foundation Types for Option Greeks
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Closed enumerations for the string-typed fields of an option:
//!   `OptionType`, `Position`, `BarrierType` (`types`)
//! - Token normalisation at the boundary, permissive (`from_token`) or
//!   strict (`FromStr`)
//! - Error types: `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{BarrierType, OptionType, Position};
//!
//! let option_type = OptionType::from_token("call");
//! let position = Position::from_token("-1");
//! let barrier: BarrierType = "DownIn".parse().unwrap();
//!
//! assert_eq!(option_type.phi() * position.sign(), -1.0);
//! assert!(barrier.is_barrier());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the enumerations, using
//!   their canonical tokens

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
