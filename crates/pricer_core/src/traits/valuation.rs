//! Valuation capability: price and first-order Greeks.
//!
//! # Design Philosophy
//!
//! This trait is designed for **static dispatch**. Implement it on a concrete
//! contract type whose model is an `enum`; the enum `match` selects the
//! closed-form or lattice implementation:
//!
//! ```
//! use pricer_core::traits::Valuation;
//! use pricer_core::types::PricingError;
//!
//! enum Forward {
//!     Undiscounted { spot: f64, strike: f64 },
//! }
//!
//! impl Valuation for Forward {
//!     fn price(&self) -> Result<f64, PricingError> {
//!         match self {
//!             Forward::Undiscounted { spot, strike } => Ok(spot - strike),
//!         }
//!     }
//!     fn delta(&self) -> Result<f64, PricingError> { Ok(1.0) }
//!     fn gamma(&self) -> Result<f64, PricingError> { Ok(0.0) }
//!     fn vega(&self) -> Result<f64, PricingError> { Ok(0.0) }
//!     fn theta(&self) -> Result<f64, PricingError> { Ok(0.0) }
//!     fn rho(&self) -> Result<f64, PricingError> { Ok(0.0) }
//! }
//!
//! let fwd = Forward::Undiscounted { spot: 105.0, strike: 100.0 };
//! assert_eq!(fwd.price().unwrap(), 5.0);
//! assert_eq!(fwd.greeks().unwrap().delta, 1.0);
//! ```

use crate::types::{Greeks, PricingError};

/// Entities that produce a price and the five first-order Greeks.
///
/// Every method may fail with [`PricingError::NumericalDegeneracy`] when the
/// computation leaves its valid numerical domain; parameter validation
/// happens at construction, never here.
///
/// # Invariants
/// - Methods are pure: evaluating never mutates the receiver
/// - Returned values are finite
pub trait Valuation {
    /// Present value.
    fn price(&self) -> Result<f64, PricingError>;

    /// ∂V/∂S.
    fn delta(&self) -> Result<f64, PricingError>;

    /// ∂²V/∂S².
    fn gamma(&self) -> Result<f64, PricingError>;

    /// ∂V/∂σ per unit of volatility.
    fn vega(&self) -> Result<f64, PricingError>;

    /// ∂V/∂t per year.
    fn theta(&self) -> Result<f64, PricingError>;

    /// ∂V/∂r per unit of rate.
    fn rho(&self) -> Result<f64, PricingError>;

    /// All five Greeks in one bundle.
    fn greeks(&self) -> Result<Greeks, PricingError> {
        Ok(Greeks {
            delta: self.delta()?,
            gamma: self.gamma()?,
            vega: self.vega()?,
            theta: self.theta()?,
            rho: self.rho()?,
        })
    }
}
