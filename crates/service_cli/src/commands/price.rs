//! Price command implementation
//!
//! Prices one contract and reports its Greeks. European contracts also get
//! the closed-form second-order Greeks.

use clap::Args;
use pricer_core::traits::Valuation;
use pricer_core::types::Greeks;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{create_contract, Contract};
use pricer_models::models::ValuationModel;
use serde::Serialize;
use tracing::info;

use super::MarketArgs;
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `optpricer price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Option side (call, put)
    #[arg(long, default_value = "call")]
    pub side: String,

    /// Valuation model (european, american)
    #[arg(long, default_value = "european")]
    pub model: String,
}

/// Closed-form second-order sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondOrderGreeks {
    /// ∂Δ/∂σ
    pub vanna: f64,
    /// ∂vega/∂σ
    pub volga: f64,
    /// ∂Δ/∂t, per year
    pub charm: f64,
}

/// Output of `optpricer price`
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub contract: Contract,
    pub price: f64,
    pub intrinsic: f64,
    pub greeks: Greeks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_order: Option<SecondOrderGreeks>,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<PriceReport> {
    let m = &args.market;
    let contract = create_contract(
        &args.model,
        m.spot,
        args.strike,
        m.rate,
        m.volatility,
        m.expiry,
        &args.side,
        Some(config.default_steps),
    )?;

    let price = contract.price()?;
    let greeks = contract.greeks()?;

    let second_order = match contract.model() {
        ValuationModel::European => {
            let bs = BlackScholes::new(m.spot, m.rate, m.volatility)?;
            Some(SecondOrderGreeks {
                vanna: bs.vanna(args.strike, m.expiry)?,
                volga: bs.volga(args.strike, m.expiry)?,
                charm: bs.charm(args.strike, m.expiry)?,
            })
        }
        ValuationModel::American { .. } => None,
    };

    info!(model = %contract.model(), price, "contract priced");

    Ok(PriceReport {
        price,
        intrinsic: contract.params().intrinsic(),
        greeks,
        second_order,
        contract,
    })
}
