//! # Pricer Models (L2: Business Logic)
//!
//! Option valuation models, contracts and the model factory.
//!
//! This crate provides:
//! - Closed-form Black-Scholes pricing and Greeks (`analytical`)
//! - The CRR binomial lattice for American exercise (`lattice`)
//! - The [`ValuationModel`](models::ValuationModel) enum over both (`models`)
//! - Validated parameters, contracts and name-based construction (`instruments`)
//! - Implied volatility and Greek surfaces as closed-form utilities
//!
//! ## Design Principles
//!
//! - **Enum-based models** for static dispatch: {European, American(steps)}
//! - **Validate at construction**: evaluation only fails on numerical degeneracy
//! - **Value semantics**: bumps and scenarios work on copies, never in place
//!
//! ## Units
//!
//! Vega and rho are per unit of volatility and rate; theta is per year.
//!
//! ## Example
//!
//! ```
//! use pricer_core::traits::Valuation;
//! use pricer_models::instruments::create_contract;
//!
//! let call = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "call", None).unwrap();
//! let put = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap();
//!
//! // Put-call parity
//! let parity = call.price().unwrap() - put.price().unwrap();
//! assert!((parity - (100.0 - 100.0 * (-0.05_f64).exp())).abs() < 1e-10);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;
pub mod models;
