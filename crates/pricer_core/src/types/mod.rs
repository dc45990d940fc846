//! Core value and error types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing and solver operations
//! - `side`: Call/put discriminator with intrinsic payoff
//! - `greeks`: First-order sensitivity bundle
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`], [`SolverError`] from `error`
//! - [`OptionSide`] from `side`
//! - [`Greeks`] from `greeks`

pub mod error;
pub mod greeks;
pub mod side;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use greeks::Greeks;
pub use side::OptionSide;
