//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Derivatives smaller than this are treated as zero.
const DERIVATIVE_FLOOR: f64 = 1e-30;

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)`; converges quadratically near a
/// simple root but may fail when the derivative vanishes or the initial
/// guess is far away. Pair it with [`super::BrentSolver`] as a fallback.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` using explicit derivative `f_prime`, starting at `x0`.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - derivative too small to step
    /// * `SolverError::NumericalInstability` - iterate became non-finite
    /// * `SolverError::MaxIterationsExceeded` - no convergence within the limit
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < DERIVATIVE_FLOOR {
                return Err(SolverError::DerivativeNearZero { x });
            }

            x -= f_val / f_prime_val;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cubic_root() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let f = |x: f64| x * x * x - x - 2.0;
        let root = solver.find_root(f, |x| 3.0 * x * x - 1.0, 1.5).unwrap();
        assert!(f(root).abs() < 1e-10);
    }

    #[test]
    fn test_derivative_near_zero() {
        let solver = NewtonRaphsonSolver::with_defaults();
        match solver.find_root(|x| x * x + 1.0, |_| 0.0, 0.0) {
            Err(SolverError::DerivativeNearZero { x }) => assert_eq!(x, 0.0),
            other => panic!("Expected DerivativeNearZero, got {:?}", other),
        }
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 3));
        // x² + 1 has no real root; Newton wanders
        match solver.find_root(|x| x * x + 1.0, |x| 2.0 * x, 0.5) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 3),
            other => panic!("Expected MaxIterationsExceeded, got {:?}", other),
        }
    }
}
