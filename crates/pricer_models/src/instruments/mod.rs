//! Option contracts and their construction.
//!
//! - [`OptionParams`]: validated spot, strike, rate, volatility, expiry and side
//! - [`Contract`]: parameters bound to a [`ValuationModel`](crate::models::ValuationModel),
//!   implementing [`Valuation`](pricer_core::traits::Valuation)
//! - [`ModelFactory`] and [`create_contract`]: name-based construction
//!
//! # Examples
//!
//! ```
//! use pricer_core::traits::Valuation;
//! use pricer_models::instruments::create_contract;
//!
//! let european = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap();
//! let american = create_contract("american", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap();
//! assert!(american.price().unwrap() >= european.price().unwrap());
//! ```

mod contract;
mod factory;
mod params;

pub use contract::Contract;
pub use factory::{create_contract, ModelFactory};
pub use params::OptionParams;
