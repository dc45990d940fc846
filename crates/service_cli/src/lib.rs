//! # optpricer CLI
//!
//! Command-line front end over the pricer crates: single-contract pricing,
//! standard strategies, scenario risk, Greek surfaces and implied
//! volatility, each reported as JSON.

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
