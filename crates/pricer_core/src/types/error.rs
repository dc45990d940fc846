//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from contract construction, factory dispatch and evaluation
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure is local to the call that produced it; there is no
/// retry or partial-failure state.
///
/// # Variants
/// - `InvalidParameter`: Non-positive spot/strike/volatility, negative expiry, unknown side
/// - `UnknownModel`: Model name not present in the model registry
/// - `UnknownStrategy`: Strategy name not present in the strategy registry
/// - `InvalidStrategyConfiguration`: Strike ordering violated for a strategy kind
/// - `NumericalDegeneracy`: Lattice probability outside (0, 1), vanishing σ√T,
///   or a non-finite result
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter("spot must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid parameter: spot must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid contract or engine parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unknown valuation model name.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Unknown strategy name.
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Strategy legs violate the strike ordering of their kind.
    #[error("Invalid strategy configuration: {0}")]
    InvalidStrategyConfiguration(String),

    /// Computation left its numerically valid domain.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),
}

impl PricingError {
    /// Builds an `InvalidParameter` error for a value that must be strictly positive.
    pub fn not_positive(name: &str, value: f64) -> Self {
        PricingError::InvalidParameter(format!("{} must be positive and finite, got {}", name, value))
    }

    /// Returns true for errors raised while validating inputs.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidParameter(_)
                | PricingError::UnknownModel(_)
                | PricingError::UnknownStrategy(_)
                | PricingError::InvalidStrategyConfiguration(_)
        )
    }
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalDegeneracy(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let cases = [
            (
                PricingError::InvalidParameter("bad".to_string()),
                "Invalid parameter: bad",
            ),
            (
                PricingError::UnknownModel("bermudan".to_string()),
                "Unknown model: bermudan",
            ),
            (
                PricingError::UnknownStrategy("butterfly".to_string()),
                "Unknown strategy: butterfly",
            ),
            (
                PricingError::InvalidStrategyConfiguration("K1 >= K2".to_string()),
                "Invalid strategy configuration: K1 >= K2",
            ),
            (
                PricingError::NumericalDegeneracy("p = 1.2".to_string()),
                "Numerical degeneracy: p = 1.2",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(format!("{}", err), expected);
        }
    }

    #[test]
    fn test_not_positive_message() {
        let err = PricingError::not_positive("spot", -1.0);
        match err {
            PricingError::InvalidParameter(msg) => {
                assert!(msg.contains("spot"));
                assert!(msg.contains("-1"));
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_is_input_error() {
        assert!(PricingError::UnknownModel("x".into()).is_input_error());
        assert!(PricingError::InvalidStrategyConfiguration("x".into()).is_input_error());
        assert!(!PricingError::NumericalDegeneracy("x".into()).is_input_error());
    }

    #[test]
    fn test_solver_error_into_pricing_error() {
        let err: PricingError = SolverError::NoBracket { a: 0.0, b: 1.0 }.into();
        match err {
            PricingError::NumericalDegeneracy(msg) => assert!(msg.contains("No bracket")),
            other => panic!("Expected NumericalDegeneracy, got {:?}", other),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidParameter("x".into());
        let _: &dyn std::error::Error = &err;
        let err = SolverError::MaxIterationsExceeded { iterations: 3 };
        let _: &dyn std::error::Error = &err;
    }
}
