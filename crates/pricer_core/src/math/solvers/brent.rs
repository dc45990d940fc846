//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Bracketing root finder combining bisection, secant and inverse quadratic
/// interpolation.
///
/// Requires `f(a)` and `f(b)` of opposite sign; convergence is then
/// guaranteed, superlinear on smooth functions.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::NumericalInstability` - `f` is not finite on the bracket
    /// * `SolverError::MaxIterationsExceeded` - no convergence within the limit
    pub fn find_root<F>(&self, f: F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if !(fa.is_finite() && fb.is_finite()) {
            return Err(SolverError::NumericalInstability(format!(
                "non-finite bracket values f({}) = {}, f({}) = {}",
                a, fa, b, fb
            )));
        }
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa * fb > 0.0 {
            return Err(SolverError::NoBracket { a, b });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            // Keep the root between b and c
            if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.config.tolerance;
            let m = 0.5 * (c - b);

            if m.abs() <= tol || fb.abs() < self.config.tolerance {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (2.0 * m * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                let min1 = 3.0 * m * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(m) };
            fb = f(b);

            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "function evaluated to {} at x = {}",
                    fb, b
                )));
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
    fn test_find_sqrt_2() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_find_sin_root() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x: f64| x.sin(), 3.0, 4.0).unwrap();
        assert!((root - std::f64::consts::PI).abs() < 1e-10);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_root_at_bracket_endpoint() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x - 1.0, 0.0, 1.0).unwrap();
        assert!((root - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_bracket() {
        let solver = BrentSolver::with_defaults();
        match solver.find_root(|x| x * x + 1.0, -1.0, 1.0) {
            Err(SolverError::NoBracket { a, b }) => {
                assert_eq!(a, -1.0);
                assert_eq!(b, 1.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 2));
        match solver.find_root(|x| x * x * x - x - 2.0, -10.0, 10.0) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 2),
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn finds_root_of_shifted_cubic(root in -50.0f64..50.0) {
                let solver = BrentSolver::with_defaults();
                let f = |x: f64| (x - root).powi(3) + (x - root);
                let found = solver.find_root(f, -100.0, 100.0).unwrap();
                prop_assert!((found - root).abs() < 1e-8);
            }
        }
    }
}
