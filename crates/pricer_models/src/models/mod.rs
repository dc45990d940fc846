//! Valuation model selection.
//!
//! - [`ValuationModel`]: closed set of models with `match`-based dispatch

pub mod model_enum;

pub use model_enum::ValuationModel;
