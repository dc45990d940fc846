//! Implied volatility command implementation

use clap::Args;
use pricer_core::types::OptionSide;
use pricer_models::analytical::implied_volatility;
use serde::Serialize;

use crate::Result;

/// Arguments of `optpricer implied-vol`
#[derive(Debug, Clone, Args)]
pub struct ImpliedVolArgs {
    /// Observed option price
    #[arg(long)]
    pub price: f64,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Option side (call, put)
    #[arg(long, default_value = "call")]
    pub side: String,
}

/// Output of `optpricer implied-vol`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpliedVolReport {
    pub side: OptionSide,
    pub market_price: f64,
    pub implied_volatility: f64,
}

/// Run the implied-vol command
pub fn run(args: &ImpliedVolArgs) -> Result<ImpliedVolReport> {
    let side: OptionSide = args.side.parse()?;
    let vol = implied_volatility(args.price, args.spot, args.strike, args.rate, args.expiry, side)?;
    Ok(ImpliedVolReport {
        side,
        market_price: args.price,
        implied_volatility: vol,
    })
}
