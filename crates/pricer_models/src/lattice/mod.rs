//! Binomial lattice pricing for American exercise.
//!
//! - [`BinomialLattice`]: CRR tree parameters and backward induction
//! - [`AmericanBinomial`]: price and finite-difference Greeks on the tree

pub mod american;
pub mod binomial;

pub use american::{AmericanBinomial, DEFAULT_STEPS};
pub use binomial::BinomialLattice;
