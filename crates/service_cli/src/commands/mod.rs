//! CLI command implementations
//!
//! Each submodule implements a specific CLI command and returns a
//! serialisable report; `main` renders it as JSON.

pub mod implied_vol;
pub mod price;
pub mod risk;
pub mod strategy;
pub mod surface;

use clap::Args;
use serde::Serialize;

use crate::Result;

/// Market inputs shared by the pricing commands
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long = "vol")]
    pub volatility: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,
}

/// Render a report as JSON
pub fn to_json<T: Serialize>(report: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(json)
}
