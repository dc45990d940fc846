//! Core traits shared by every valuation model.
//!
//! This module defines the single valuation interface implemented by the
//! closed set of models in `pricer_models`. Dispatch across models happens
//! through `match` on an enum, not through trait objects.

pub mod valuation;

pub use valuation::Valuation;
