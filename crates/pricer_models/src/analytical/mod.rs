//! Closed-form pricing for European options.
//!
//! This module provides:
//! - Normal distribution primitives (`distributions`)
//! - The Black-Scholes model with first- and second-order Greeks
//! - Implied volatility inversion
//! - Greek surfaces over spot and volatility

pub mod black_scholes;
pub mod distributions;
pub mod implied_vol;
pub mod surface;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use implied_vol::implied_volatility;
pub use surface::{greek_surface, GreekKind, GreekSurface};
