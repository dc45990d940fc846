//! Strategy commands: build a named strategy and list what is available.

use clap::Args;
use pricer_core::types::Greeks;
use pricer_models::analytical::GreekKind;
use pricer_models::instruments::ModelFactory;
use pricer_risk::strategy::{LegSummary, Strategy, StrategyFactory, StrategyKind};
use serde::Serialize;
use tracing::info;

use super::MarketArgs;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Strategy selection shared by `strategy` and `risk`
#[derive(Debug, Clone, Args)]
pub struct StrategyRequest {
    /// Strategy name (straddle, strangle, bull_call, iron_condor)
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub market: MarketArgs,

    /// Anchor strike; defaults to the spot
    #[arg(long)]
    pub anchor: Option<f64>,

    /// Build the short side (every quantity negated)
    #[arg(long)]
    pub short: bool,

    /// Valuation model for every leg (european, american)
    #[arg(long, default_value = "european")]
    pub model: String,
}

impl StrategyRequest {
    /// Build the strategy through the factory
    pub fn build(&self, config: &CliConfig) -> Result<Strategy> {
        let model = ModelFactory::model(&self.model, Some(config.default_steps))?;
        let m = &self.market;
        let strategy = StrategyFactory::new(model).create(
            &self.name,
            m.spot,
            self.anchor.unwrap_or(m.spot),
            m.rate,
            m.volatility,
            m.expiry,
            !self.short,
        )?;
        Ok(strategy)
    }
}

/// Arguments of `optpricer strategy`
#[derive(Debug, Clone, Args)]
pub struct StrategyArgs {
    #[command(flatten)]
    pub request: StrategyRequest,

    /// Lower end of the payoff analysis range, as a multiple of spot
    #[arg(long, default_value_t = 0.5)]
    pub range_lower: f64,

    /// Upper end of the payoff analysis range, as a multiple of spot
    #[arg(long, default_value_t = 1.5)]
    pub range_upper: f64,

    /// Number of payoff samples
    #[arg(long, default_value_t = 1001)]
    pub samples: usize,
}

/// Output of `optpricer strategy`
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub kind: StrategyKind,
    pub legs: Vec<LegSummary>,
    /// Σ quantity·entry premium; negative for a net credit
    pub net_premium: f64,
    pub mark_to_market: f64,
    pub greeks: Greeks,
    pub max_profit: f64,
    pub max_loss: f64,
    pub breakevens: Vec<f64>,
}

/// Run the strategy command
pub fn run(args: &StrategyArgs, config: &CliConfig) -> Result<StrategyReport> {
    if !(args.range_lower > 0.0 && args.range_upper > args.range_lower) {
        return Err(CliError::invalid_argument(format!(
            "payoff range must satisfy 0 < lower < upper, got {}..{}",
            args.range_lower, args.range_upper
        )));
    }

    let strategy = args.request.build(config)?;
    let spot = args.request.market.spot;
    let (lower, upper) = (args.range_lower * spot, args.range_upper * spot);
    let extremes = strategy.expiry_extremes(lower, upper, args.samples)?;

    let report = StrategyReport {
        kind: strategy.kind(),
        legs: strategy.leg_summaries(),
        net_premium: strategy.total_price(),
        mark_to_market: strategy.mark_to_market()?,
        greeks: strategy.total_greeks()?,
        max_profit: extremes.max_profit,
        max_loss: extremes.max_loss,
        breakevens: strategy.breakevens(lower, upper, args.samples)?,
    };
    info!(strategy = %report.kind, legs = report.legs.len(), "strategy built");
    Ok(report)
}

/// Output of `optpricer strategies`
#[derive(Debug, Clone, Serialize)]
pub struct Catalogue {
    pub strategies: Vec<&'static str>,
    pub models: Vec<&'static str>,
    pub greeks: Vec<&'static str>,
}

/// Run the strategies command
pub fn catalogue() -> Catalogue {
    Catalogue {
        strategies: StrategyFactory::available_strategies(),
        models: ModelFactory::available_models(),
        greeks: GreekKind::ALL.iter().map(GreekKind::as_str).collect(),
    }
}
