//! # pricer_core: Foundation Layer for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Option side: `OptionSide` (`types::side`)
//! - Sensitivity bundle: `Greeks` (`types::greeks`)
//! - The valuation capability shared by every model (`traits::valuation`)
//! - Root-finding solvers used for implied volatility (`math::solvers`)
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
//! use pricer_core::types::{Greeks, OptionSide, PricingError};
//!
//! let side: OptionSide = "call".parse().unwrap();
//! assert!(side.is_call());
//! assert_eq!(side.intrinsic(110.0, 100.0), 10.0);
//!
//! let err = "straddle".parse::<OptionSide>().unwrap_err();
//! assert!(matches!(err, PricingError::InvalidParameter(_)));
//!
//! let leg = Greeks::new(0.5, 0.02, 38.0, -6.4, 53.0);
//! let net = leg.scaled(2.0) + leg.scaled(-1.0);
//! assert!((net.delta - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `OptionSide`, `Greeks` and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
