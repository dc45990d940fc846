//! Numerical building blocks.
//!
//! - `solvers`: one-dimensional root finders (Brent, Newton-Raphson)

pub mod solvers;
